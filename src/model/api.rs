use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response when an API request succeeds without returning data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    /// Human readable outcome
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{success, data?, error?}` envelope used by the account ownership endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// A single page of results
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    /// Zero-based page index
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Pagination query parameters, `page` is zero-based
#[derive(Clone, Copy, Debug, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "PageParams::default_per_page")]
    pub per_page: u64,
}

impl PageParams {
    pub const MAX_PER_PAGE: u64 = 200;

    fn default_per_page() -> u64 {
        50
    }

    /// Page size clamped to `1..=MAX_PER_PAGE`
    pub fn per_page(&self) -> u64 {
        self.per_page.clamp(1, Self::MAX_PER_PAGE)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: Self::default_per_page(),
        }
    }
}
