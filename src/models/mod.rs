pub mod user;
pub mod repository;
pub mod commit;
pub mod activity;
pub mod calendar;
pub mod stats;
pub mod timeline;
pub mod insight;
pub mod contribution;

pub use user::*;
pub use repository::*;
pub use commit::*;
pub use activity::*;
pub use calendar::*;
pub use stats::*;
pub use timeline::*;
pub use insight::*;
pub use contribution::*;
