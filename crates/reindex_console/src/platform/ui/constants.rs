pub const TAG_OK: &str = "[OK]";
pub const TAG_ERROR: &str = "[ERROR]";
pub const MARK_SUCCESS: &str = "+";
pub const MARK_FAILURE: &str = "!";
pub const INDENT: &str = "  ";
