pub mod admin;
pub mod auth;
pub mod page;
pub mod question;
pub mod ticket;

pub use admin::{
    AdminOperatorStat, AdminQaStat, AdminStats, AdminUserStat, OperatorFeedback,
    OperatorProductivity, OperatorSeriesPoint, OperatorSignup,
};
pub use auth::{
    CheckEmailResponse, LoginRequest, LoginResponse, Profile, RecoveryRequest,
    RegisterOperatorRequest, RegisterRequest, Role, SessionRecord, SessionStatus,
};
pub use page::{Paginated, RawId};
pub use question::{Answer, Question, QuestionCreate, QuestionStatus};
pub use ticket::{Dept, Ticket, TicketCreate, TicketPatch, TicketStatus};
