//! Data transfer objects for the web API.

mod request;
mod response;
mod validation;

pub use request::{
    CommentRequest, CreatePostRequest, LoginRequest, PageQuery, SignupRequest, UpdatePostRequest,
};
pub use response::{
    ApiResponse, CommentView, GroupPageResponse, GroupView, LoginResponse, PaginatedResponse,
    PaginationMeta, PostDetailResponse, PostFormResponse, PostView, ProfileResponse, UserInfo,
};
pub use validation::{no_control_chars, not_empty_trimmed, ValidatedJson};
