/// Methods accepted by the CORS layer
pub const CORS_ALLOWED_METHODS: [&str; 3] = ["GET", "POST", "OPTIONS"];
