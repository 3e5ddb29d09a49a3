//! Domain models for employees and companies.

mod company;
mod employee;
mod page;

pub use company::{Company, CompanyPatch};
pub use employee::{Employee, EmployeePatch, EmployeeStatus, MAX_VALID_AGE, MIN_VALID_AGE};
pub use page::PageRequest;
