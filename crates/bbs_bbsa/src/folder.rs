//! Folder names recovered from folder hashes
//!
//! Folders whose name was not stored in the catalog still encode what they contain inside their hash.
//!
//! | Bits    | Field    | Description                                   |
//! |---------|----------|-----------------------------------------------|
//! | 24..32  | Category | Kind of content, selects the path template    |
//! | 21..24  | Language | Index into [`LANGUAGES`]                      |
//! | 16..21  | World    | Index into [`WORLDS`]                         |
//! | 0..16   | Id       | Identifier of the folder inside its category  |

/// Short codes of the game worlds, indexed by the world field of a folder hash
pub const WORLDS: [&str; 17] = [
    "ex", "dp", "sw", "cd", "sb", "yt", "rg", "jb", "he", "ls", "di", "pp", "dc", "kg", "vs", "bd",
    "wm",
];

/// Short codes of the game languages, indexed by the language field of a folder hash
pub const LANGUAGES: [&str; 6] = ["jp", "en", "fr", "it", "de", "sp"];

/// A folder hash split into its fields
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FolderHash {
    pub category: u8,
    pub language: u8,
    pub world: u8,
    /// Not part of any path
    pub id: u16,
}

impl From<u32> for FolderHash {
    fn from(hash: u32) -> Self {
        Self {
            category: (hash >> 24) as u8,
            language: ((hash >> 21) & 0x7) as u8,
            world: ((hash >> 16) & 0x1F) as u8,
            id: (hash & 0xFFFF) as u16,
        }
    }
}

impl FolderHash {
    /// Code of the world this folder belongs to, if the index is a known one
    pub fn world_name(&self) -> Option<&'static str> {
        WORLDS.get(usize::from(self.world)).copied()
    }

    /// Code of the language this folder belongs to, if the index is a known one
    pub fn language_name(&self) -> Option<&'static str> {
        LANGUAGES.get(usize::from(self.language)).copied()
    }

    /// Build the folder path for this hash, or `None` for an unknown category.
    ///
    /// An unknown world or language leaves its path segment empty.
    pub fn path(&self) -> Option<String> {
        let world = self.world_name().unwrap_or_default();
        let language = self.language_name().unwrap_or_default();

        let path = match self.category {
            0x00 => "arc_".to_owned(),
            0x80 => "sound/bgm".to_owned(),
            0xC0 => "lua".to_owned(),
            0x90 => "sound/se/common".to_owned(),
            0x91 => format!("sound/se/event/{world}"),
            0x92 => format!("sound/se/footstep/{world}"),
            0x93 => "sound/se/enemy".to_owned(),
            0x94 => "sound/se/weapon".to_owned(),
            0x95 => "sound/se/act".to_owned(),
            0xA1 => format!("sound/voice/{language}/event/{world}"),
            0xAA => format!("sound/voice/{language}/battle"),
            0xD0 => format!("message/{language}/system"),
            0xD1 => format!("message/{language}/map"),
            0xD2 => format!("message/{language}/menu"),
            0xD3 => format!("message/{language}/event"),
            0xD4 => format!("message/{language}/mission"),
            0xD5 => format!("message/{language}/npc_talk/{world}"),
            0xD6 => format!("message/{language}/network"),
            0xD7 => format!("message/{language}/battledice"),
            0xD8 => format!("message/{language}/minigame"),
            0xD9 => format!("message/{language}/shop"),
            0xDA => format!("message/{language}/playerselect"),
            0xDB => format!("message/{language}/report"),
            _ => return None,
        };

        Some(path)
    }
}

/// Resolve the folder path encoded in a folder hash
///
/// ```
/// assert_eq!(bbs_bbsa::folder::resolve_folder(0x80123456).as_deref(), Some("sound/bgm"));
/// assert_eq!(bbs_bbsa::folder::resolve_folder(0x12345678), None);
/// ```
pub fn resolve_folder(hash: u32) -> Option<String> {
    FolderHash::from(hash).path()
}
