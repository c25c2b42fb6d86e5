//! Demo content for the in-memory filesystem.

use cathode_vfs::Vfs;

/// Populate a fresh VFS with a small browsable world.
pub fn populate_demo_vfs(vfs: &dyn Vfs) {
    let dirs = [
        "/games",
        "/games/retro",
        "/media",
        "/media/music",
        "/docs",
        "/backup",
    ];
    for dir in dirs {
        let _ = vfs.mkdir(dir);
    }

    let files: [(&str, &[u8]); 5] = [
        ("/docs/readme.txt", b"Welcome to the terminal. Type help."),
        ("/docs/notes.txt", b"- fix the antenna\n- feed the cat"),
        ("/games/retro/invaders.rom", &[0xAA; 2048]),
        ("/media/music/theme.ogg", &[0x55; 8192]),
        ("/media/wallpaper.bmp", &[0x11; 4096]),
    ];
    for (path, data) in files {
        let _ = vfs.write(path, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cathode_vfs::MemoryVfs;

    #[test]
    fn demo_world_is_browsable() {
        let vfs = MemoryVfs::new();
        populate_demo_vfs(&vfs);
        assert!(vfs.exists("/games/retro/invaders.rom"));
        assert!(vfs.exists("/docs/readme.txt"));
        assert!(!vfs.readdir("/media").unwrap().is_empty());
    }
}
