#[cfg(test)]
mod integration_test;

use std::sync::Arc;

use dao_impl_sqlite::{
    employee::EmployeeDaoImpl, leave::LeaveDaoImpl, shift::ShiftDaoImpl, swap::SwapRequestDaoImpl,
    PermissionDaoImpl, TransactionDaoImpl, TransactionImpl,
};
use sqlx::SqlitePool;
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

type Context = rest::Context;
type Transaction = TransactionImpl;
type TransactionDao = TransactionDaoImpl;
type PermissionDao = PermissionDaoImpl;
type ShiftDao = ShiftDaoImpl;
type LeaveDao = LeaveDaoImpl;
type EmployeeDao = EmployeeDaoImpl;
type SwapRequestDao = SwapRequestDaoImpl;

type UserService = service_impl::UserServiceDev;
type ClockService = service_impl::clock::ClockServiceImpl;
type UuidService = service_impl::uuid_service::UuidServiceImpl;
type ConfigService = service_impl::config::ConfigServiceImpl;

pub struct PermissionServiceDependencies;
impl service_impl::permission::PermissionServiceDeps for PermissionServiceDependencies {
    type Context = Context;
    type Transaction = Transaction;
    type PermissionDao = PermissionDao;
    type UserService = UserService;
}
type PermissionService = service_impl::permission::PermissionServiceImpl<PermissionServiceDependencies>;

pub struct ConflictCheckerDependencies;
impl service_impl::conflict::ConflictCheckerDeps for ConflictCheckerDependencies {
    type Context = Context;
    type Transaction = Transaction;
    type ShiftDao = ShiftDao;
    type LeaveDao = LeaveDao;
    type EmployeeDao = EmployeeDao;
    type TransactionDao = TransactionDao;
}
type ConflictCheckService = service_impl::conflict::ConflictCheckerImpl<ConflictCheckerDependencies>;

pub struct ShiftServiceDependencies;
impl service_impl::shift::ShiftServiceDeps for ShiftServiceDependencies {
    type Context = Context;
    type Transaction = Transaction;
    type ShiftDao = ShiftDao;
    type EmployeeDao = EmployeeDao;
    type ConflictCheckService = ConflictCheckService;
    type PermissionService = PermissionService;
    type ClockService = ClockService;
    type UuidService = UuidService;
    type TransactionDao = TransactionDao;
}
type ShiftService = service_impl::shift::ShiftServiceImpl<ShiftServiceDependencies>;

pub struct AvailabilityServiceDependencies;
impl service_impl::availability::AvailabilityServiceDeps for AvailabilityServiceDependencies {
    type Context = Context;
    type Transaction = Transaction;
    type EmployeeDao = EmployeeDao;
    type ShiftDao = ShiftDao;
    type LeaveDao = LeaveDao;
    type PermissionService = PermissionService;
    type TransactionDao = TransactionDao;
}
type AvailabilityService =
    service_impl::availability::AvailabilityServiceImpl<AvailabilityServiceDependencies>;

pub struct SwapServiceDependencies;
impl service_impl::swap::SwapServiceDeps for SwapServiceDependencies {
    type Context = Context;
    type Transaction = Transaction;
    type SwapRequestDao = SwapRequestDao;
    type ShiftDao = ShiftDao;
    type ConflictCheckService = ConflictCheckService;
    type ConfigService = ConfigService;
    type PermissionService = PermissionService;
    type ClockService = ClockService;
    type UuidService = UuidService;
    type TransactionDao = TransactionDao;
}
type SwapService = service_impl::swap::SwapServiceImpl<SwapServiceDependencies>;

#[derive(Clone)]
pub struct RestStateImpl {
    shift_service: Arc<ShiftService>,
    availability_service: Arc<AvailabilityService>,
    swap_service: Arc<SwapService>,
}

impl rest::RestStateDef for RestStateImpl {
    type Transaction = Transaction;
    type ShiftService = ShiftService;
    type AvailabilityService = AvailabilityService;
    type SwapService = SwapService;

    fn shift_service(&self) -> Arc<Self::ShiftService> {
        self.shift_service.clone()
    }
    fn availability_service(&self) -> Arc<Self::AvailabilityService> {
        self.availability_service.clone()
    }
    fn swap_service(&self) -> Arc<Self::SwapService> {
        self.swap_service.clone()
    }
}

impl RestStateImpl {
    pub fn new(pool: Arc<sqlx::Pool<sqlx::Sqlite>>) -> Self {
        let transaction_dao = Arc::new(TransactionDao::new(pool.clone()));
        let permission_dao = Arc::new(PermissionDao::new(pool.clone()));
        let shift_dao = Arc::new(ShiftDao::new(pool.clone()));
        let leave_dao = Arc::new(LeaveDao::new(pool.clone()));
        let employee_dao = Arc::new(EmployeeDao::new(pool.clone()));
        let swap_request_dao = Arc::new(SwapRequestDao::new(pool.clone()));

        let user_service = Arc::new(service_impl::UserServiceDev);
        let permission_service = Arc::new(PermissionService::new(permission_dao, user_service));
        let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
        let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);
        let config_service = Arc::new(service_impl::config::ConfigServiceImpl);

        let conflict_check_service = Arc::new(ConflictCheckService::new(
            shift_dao.clone(),
            leave_dao.clone(),
            employee_dao.clone(),
            transaction_dao.clone(),
        ));
        let shift_service = Arc::new(ShiftService::new(
            shift_dao.clone(),
            employee_dao.clone(),
            conflict_check_service.clone(),
            permission_service.clone(),
            clock_service.clone(),
            uuid_service.clone(),
            transaction_dao.clone(),
        ));
        let availability_service = Arc::new(AvailabilityService::new(
            employee_dao.clone(),
            shift_dao.clone(),
            leave_dao.clone(),
            permission_service.clone(),
            transaction_dao.clone(),
        ));
        let swap_service = Arc::new(SwapService::new(
            swap_request_dao,
            shift_dao,
            conflict_check_service,
            config_service,
            permission_service,
            clock_service,
            uuid_service,
            transaction_dao,
        ));

        Self {
            shift_service,
            availability_service,
            swap_service,
        }
    }
}

async fn create_dev_user(pool: Arc<SqlitePool>, username: &str) {
    use dao::PermissionDao;
    let permission_dao = PermissionDaoImpl::new(pool.clone());

    let existing = permission_dao
        .find_user(username)
        .await
        .expect("Expected user lookup to work");
    if existing.is_none() {
        permission_dao
            .create_user(
                &dao::UserEntity {
                    name: username.into(),
                },
                "dev-first-start",
            )
            .await
            .unwrap_or_else(|_| panic!("Expected being able to create the {}", username));
        permission_dao
            .add_user_role(username, "admin", "dev-first-start")
            .await
            .unwrap_or_else(|_| panic!("Expected being able to make {} an admin", username));
    }
}

#[tokio::main]
async fn main() {
    let version = env!("CARGO_PKG_VERSION");

    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .pretty()
        .with_file(true)
        .finish();

    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Rota backend version: {}", version);
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./localdb.sqlite3".to_string());
    let pool = Arc::new(
        SqlitePool::connect(&database_url)
            .await
            .expect("Could not connect to database"),
    );

    sqlx::migrate!("../migrations/sqlite")
        .run(pool.as_ref())
        .await
        .expect("Failed to run migrations");

    let rest_state = RestStateImpl::new(pool.clone());
    create_dev_user(pool.clone(), "DEVUSER").await;

    rest::start_server(rest_state).await
}
