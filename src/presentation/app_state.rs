// Application state for HTTP handlers
use crate::application::assistant_service::AssistantService;
use crate::application::dashboard_service::DashboardService;
use crate::application::intake_service::IntakeService;
use crate::application::ticket_service::TicketService;
use crate::domain::manager::ManagerProfile;

pub struct AppState {
    pub dashboard_service: DashboardService,
    pub ticket_service: TicketService,
    pub intake_service: IntakeService,
    pub assistant_service: AssistantService,
    pub manager_profile: ManagerProfile,
}
