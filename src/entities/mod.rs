pub mod animal;
pub mod employee;
pub mod habitat;
pub mod ticket;
pub mod veterinary_status;
pub mod visit;
pub mod visitor;

pub use animal::Entity as Animal;
pub use employee::Entity as Employee;
pub use habitat::Entity as Habitat;
pub use ticket::Entity as Ticket;
pub use veterinary_status::Entity as VeterinaryStatus;
pub use visit::Entity as Visit;
pub use visitor::Entity as Visitor;

pub mod prelude;
