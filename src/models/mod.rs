pub mod book;
pub mod member;
pub mod transaction;

pub use book::{Book, BookStatus};
pub use member::{Member, MemberStatus, NewMember};
pub use transaction::{LoanState, Transaction, TransactionStatus, TransactionView};
