pub mod admin_view;
pub mod agents_view;
pub mod dashboard_view;
pub mod login_view;
pub mod products_view;
pub mod profile_view;
pub mod retirement_view;

pub use admin_view::AdminView;
pub use agents_view::AgentsView;
pub use dashboard_view::DashboardView;
pub use login_view::LoginView;
pub use products_view::ProductsView;
pub use profile_view::ProfileView;
pub use retirement_view::RetirementView;
