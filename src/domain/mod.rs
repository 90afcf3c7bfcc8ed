pub mod article;
pub mod category;
pub mod location;
pub mod topic;
pub mod user;

pub use article::{Article, ArticleSource};
pub use category::Category;
pub use location::UserLocation;
pub use topic::Topic;
pub use user::{
    AuthResponse, AuthUser, ForgotPasswordPayload, LoginPayload, LoginResponse, RegisterPayload,
    ResetPasswordPayload, SupportRequest,
};
