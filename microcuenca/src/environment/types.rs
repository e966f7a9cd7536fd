use microcuenca_core_config_impl::ConfigFeatureServiceImpl;
use microcuenca_core_contact_impl::{
    dispatch::ContactDispatchServiceImpl, ContactFeatureServiceImpl,
};
use microcuenca_core_health_impl::HealthFeatureServiceImpl;
use microcuenca_email_impl::EmailServiceImpl;
use microcuenca_shared_impl::{
    process::ProcessServiceImpl, time::TimeServiceImpl, tracking::TrackingIdServiceImpl,
};

// API
pub type RestServer =
    microcuenca_api_rest::RestServer<HealthFeature, ConfigFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Time = TimeServiceImpl;
pub type TrackingId = TrackingIdServiceImpl<Time>;
pub type Process = ProcessServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Process, Email>;

pub type ConfigFeature = ConfigFeatureServiceImpl;

pub type ContactFeature = ContactFeatureServiceImpl<ContactDispatch, Process>;
pub type ContactDispatch = ContactDispatchServiceImpl<Time, TrackingId, Email>;
