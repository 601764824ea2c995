pub mod admin;
pub mod login;
pub mod operator;
pub mod shared;
pub mod user;

pub use admin::render_admin;
pub use login::render_login;
pub use operator::render_operator;
pub use user::render_user;
