//! Domain models and the repository over them.

pub mod billing;
pub mod class;
pub mod equipment;
pub mod facility;
pub mod member;
pub mod repository;
pub mod types;

pub use billing::{MembershipPlan, NewPayment, Payment, PaymentDetails};
pub use class::{Attendance, Class, ClassAttendance, NewClass, RosterEntry};
pub use equipment::{Equipment, NewEquipment};
pub use facility::{GymFacility, Instructor};
pub use member::{Member, MemberPlan, NewMember, MIN_MEMBER_AGE};
pub use repository::GymRepository;
pub use types::{ClassType, EquipmentType, PlanType};
