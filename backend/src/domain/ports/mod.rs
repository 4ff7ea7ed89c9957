//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod email_availability_query;
mod member_id_generator;
mod member_registration_command;
mod member_repository;

#[cfg(test)]
pub use email_availability_query::MockEmailAvailabilityQuery;
pub use email_availability_query::{
    EmailAvailability, EmailAvailabilityQuery, FixtureEmailAvailabilityQuery,
};
#[cfg(test)]
pub use member_id_generator::MockMemberIdGenerator;
pub use member_id_generator::{
    FixtureMemberIdGenerator, MemberIdGenerator, UuidV7MemberIdGenerator,
};
#[cfg(test)]
pub use member_registration_command::MockMemberRegistrationCommand;
pub use member_registration_command::{
    FixtureMemberRegistrationCommand, MemberRegistrationCommand, RegistrationRequest,
    RegistrationResponse,
};
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{
    FixtureMemberRepository, MemberRepository, MemberRepositoryError, PartialUpdateOutcome,
};
