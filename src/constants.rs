// Backend API constants
pub const QUERY_PATH: &str = "/query";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Canned transcript replies
pub const ERROR_REPLY: &str = "An error occurred while processing your request.";
pub const NO_MATCH_REPLY: &str = "Sorry, I couldn't find relevant information.";
pub const EMPTY_QUERY_REPLY: &str = "Please enter a query.";
pub const VOICE_UNSUPPORTED_REPLY: &str = "Voice input is not supported on this system.";
pub const VOICE_FAILED_REPLY: &str = "Sorry, I couldn't process your voice input. Try again.";
