/// Fixed size tables and file names for every exported artifact

pub mod source {
    /// Side length of the rendered source canvas
    pub const DEFAULT_SIZE: u32 = 1024;

    /// Largest canvas accepted from configuration (keeps the buffer under 256MB)
    pub const MAX_SIZE: u32 = 8192;

    pub const FILE_NAME: &str = "icon-source.png";
}

pub mod ico {
    /// Frames embedded in the Windows bundle, smallest first (primary frame)
    pub const SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

    pub const FILE_NAME: &str = "icon.ico";
}

pub mod iconset {
    pub const DIR_NAME: &str = "icon.iconset";

    /// Canonical iconset file name -> pixel size, as iconutil expects them
    pub const ENTRIES: [(&str, u32); 10] = [
        ("icon_16x16.png", 16),
        ("icon_16x16@2x.png", 32),
        ("icon_32x32.png", 32),
        ("icon_32x32@2x.png", 64),
        ("icon_128x128.png", 128),
        ("icon_128x128@2x.png", 256),
        ("icon_256x256.png", 256),
        ("icon_256x256@2x.png", 512),
        ("icon_512x512.png", 512),
        ("icon_512x512@2x.png", 1024),
    ];

    pub const ICNS_FILE_NAME: &str = "icon.icns";

    /// The .icns placeholder is a PNG at this size until iconutil replaces it
    pub const ICNS_PLACEHOLDER_SIZE: u32 = 512;
}

pub mod png {
    /// Flat PNG set, written as `{size}x{size}.png`
    pub const SIZES: [u32; 8] = [16, 32, 48, 64, 128, 256, 512, 1024];

    pub const CANONICAL_FILE_NAME: &str = "icon.png";
    pub const CANONICAL_SIZE: u32 = 512;
}

pub mod output {
    /// Output directory relative to the crate root
    pub const DEFAULT_DIR: [&str; 2] = ["resources", "icons"];

    /// Marker that keeps the empty directory in git; removed after a run
    pub const PLACEHOLDER_MARKER: &str = ".gitkeep";
}
