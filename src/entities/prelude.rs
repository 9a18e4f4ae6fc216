pub use super::animal::Entity as Animal;
pub use super::employee::Entity as Employee;
pub use super::habitat::Entity as Habitat;
pub use super::ticket::Entity as Ticket;
pub use super::veterinary_status::Entity as VeterinaryStatus;
pub use super::visit::Entity as Visit;
pub use super::visitor::Entity as Visitor;
