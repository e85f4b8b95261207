use mockall::automock;

#[automock]
pub trait ClockService {
    fn date_time_now(&self) -> time::PrimitiveDateTime;
}
