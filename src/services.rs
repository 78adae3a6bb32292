pub mod checkin_service;
pub mod mail_service;
pub mod voucher_service;

pub use checkin_service::CheckinService;
pub use mail_service::{MailerConfig, SmtpMailer};
pub use voucher_service::{VoucherRenderer, VoucherService};
