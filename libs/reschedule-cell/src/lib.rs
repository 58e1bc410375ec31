// Reschedule Cell - missed-appointment SMS follow-up
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

pub use models::{
    BrandingView,
    InboundCommand,
    InitialMessageResponse,
    NewAppointmentRequest,
    OptionSlot,
    RescheduleError,
    SelectionOutcome,
    TimeSelection,
};

pub use router::reschedule_routes;
pub use state::RescheduleState;

