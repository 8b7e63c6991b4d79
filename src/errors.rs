use std::fmt;

#[derive(Debug, Clone)]
pub enum MyLinksError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Unauthorized(String),
    Serialization(String),
    DateParse(String),
}

impl MyLinksError {
    pub fn code(&self) -> &'static str {
        match self {
            MyLinksError::DatabaseConfig(_) => "E001",
            MyLinksError::DatabaseConnection(_) => "E002",
            MyLinksError::DatabaseOperation(_) => "E003",
            MyLinksError::Validation(_) => "E004",
            MyLinksError::NotFound(_) => "E005",
            MyLinksError::Unauthorized(_) => "E006",
            MyLinksError::Serialization(_) => "E007",
            MyLinksError::DateParse(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            MyLinksError::DatabaseConfig(_) => "Database Configuration Error",
            MyLinksError::DatabaseConnection(_) => "Database Connection Error",
            MyLinksError::DatabaseOperation(_) => "Database Operation Error",
            MyLinksError::Validation(_) => "Validation Error",
            MyLinksError::NotFound(_) => "Resource Not Found",
            MyLinksError::Unauthorized(_) => "Unauthorized",
            MyLinksError::Serialization(_) => "Serialization Error",
            MyLinksError::DateParse(_) => "Date Parse Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MyLinksError::DatabaseConfig(msg)
            | MyLinksError::DatabaseConnection(msg)
            | MyLinksError::DatabaseOperation(msg)
            | MyLinksError::Validation(msg)
            | MyLinksError::NotFound(msg)
            | MyLinksError::Unauthorized(msg)
            | MyLinksError::Serialization(msg)
            | MyLinksError::DateParse(msg) => msg,
        }
    }

    /// Colored format for server console output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// HTTP status this error maps to at the API boundary
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            MyLinksError::NotFound(_) => StatusCode::NOT_FOUND,
            MyLinksError::Validation(_) | MyLinksError::DateParse(_) => StatusCode::BAD_REQUEST,
            MyLinksError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for MyLinksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for MyLinksError {}

impl MyLinksError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        MyLinksError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        MyLinksError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        MyLinksError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        MyLinksError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        MyLinksError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        MyLinksError::Unauthorized(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        MyLinksError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        MyLinksError::DateParse(msg.into())
    }
}

impl From<sea_orm::DbErr> for MyLinksError {
    fn from(err: sea_orm::DbErr) -> Self {
        MyLinksError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for MyLinksError {
    fn from(err: std::io::Error) -> Self {
        MyLinksError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for MyLinksError {
    fn from(err: serde_json::Error) -> Self {
        MyLinksError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for MyLinksError {
    fn from(err: chrono::ParseError) -> Self {
        MyLinksError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MyLinksError>;
