pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod source;
pub use source::FinanceSource;
