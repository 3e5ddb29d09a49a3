//! Business logic services for employees and companies.
//!
//! Services orchestrate the stores and enforce the lifecycle rules,
//! using the `FromContext` derive macro for dependency injection.

mod company;
mod employee;

pub use company::CompanyService;
pub use employee::EmployeeService;

#[cfg(test)]
pub(crate) mod testing;
