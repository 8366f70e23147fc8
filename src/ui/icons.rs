pub struct Icons;

impl Icons {
    pub const PRIMARY_KEY: &str = "🔑";
    pub const FOREIGN_KEY: &str = "#️⃣";
    pub const DATABASE: &str = "🗄️";
    pub const TABLE: &str = "📋";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const LINK: &str = "🔗";
    pub const FILE: &str = "📄";
}
