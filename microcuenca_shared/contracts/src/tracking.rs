use microcuenca_models::tracking::TrackingId;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TrackingIdService: Send + Sync + 'static {
    /// Generates a new tracking id from the current time and a random suffix.
    fn generate(&self) -> TrackingId;
}

#[cfg(feature = "mock")]
impl MockTrackingIdService {
    pub fn with_generate(mut self, tracking_id: TrackingId) -> Self {
        self.expect_generate().once().return_const(tracking_id);
        self
    }
}
