use std::sync::LazyLock;

use microcuenca_models::{
    catalog::{InterestType, Program, StudyYear},
    contact::ContactSubmission,
};
use serde_json::{json, Value};

/// A university student volunteering for field work.
pub static JUAN: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Juan Pérez".try_into().unwrap(),
    email: "juan.perez@uvg.edu.gt".try_into().unwrap(),
    phone: Some("2234-5678".try_into().unwrap()),
    program: Some(Program::IngCienciaComputacion),
    interest_type: Some(InterestType::VoluntarioCampo),
    message: Some(
        "Me gustaría participar en las jornadas de reforestación."
            .try_into()
            .unwrap(),
    ),
    study_year: Some(StudyYear::Third),
    send_confirmation: true,
});

pub static JUAN_JSON: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "nombre": "Juan Pérez",
        "email": "juan.perez@uvg.edu.gt",
        "telefono": "2234-5678",
        "carrera": "ing-ciencia-computacion",
        "tipoInteres": "voluntario-campo",
        "mensaje": "Me gustaría participar en las jornadas de reforestación.",
        "anioEstudio": "3",
        "enviarConfirmacion": true,
    })
});

/// Someone outside the university asking for information, with only the
/// required fields.
pub static ANA: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Ana López".try_into().unwrap(),
    email: "ana.lopez@example.com".try_into().unwrap(),
    phone: None,
    program: None,
    interest_type: None,
    message: None,
    study_year: None,
    send_confirmation: true,
});

pub static ANA_JSON: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "nombre": "Ana López",
        "email": "ana.lopez@example.com",
    })
});
