use std::sync::LazyLock;

use microcuenca_utils::sanitize::sanitize_str;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    catalog::{InterestType, Program, StudyYear},
    macros::nutype_string,
};

pub static CONTACT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZáéíóúüñÁÉÍÓÚÜÑ\s]+$").unwrap());
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
pub static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+502\s?)?[2-9]\d{3}[-\s]?\d{4}$").unwrap());

pub const UVG_EMAIL_DOMAIN: &str = "@uvg.edu.gt";

nutype_string!(ContactName(
    sanitize(trim),
    validate(
        len_char_min = 2,
        len_char_max = 100,
        regex = CONTACT_NAME_REGEX
    )
));
nutype_string!(ContactEmail(validate(
    len_char_max = 255,
    regex = CONTACT_EMAIL_REGEX
)));
nutype_string!(PhoneNumber(validate(regex = PHONE_NUMBER_REGEX)));
nutype_string!(ContactMessage(
    sanitize(trim),
    validate(not_empty, len_char_max = 500)
));

impl ContactName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 100;
}

impl ContactEmail {
    pub const MAX_LENGTH: usize = 255;

    /// Whether this is an address of the university.
    pub fn is_uvg(&self) -> bool {
        self.to_lowercase().contains(UVG_EMAIL_DOMAIN)
    }
}

impl PhoneNumber {
    pub const EXAMPLE: &'static str = "2234-5678 o +502 2234-5678";
}

impl ContactMessage {
    pub const MAX_LENGTH: usize = 500;
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<PhoneNumber>,
    pub program: Option<Program>,
    pub interest_type: Option<InterestType>,
    pub message: Option<ContactMessage>,
    pub study_year: Option<StudyYear>,
    pub send_confirmation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Datos de entrada no válidos")]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: "body".into(),
                message: message.into(),
            }],
        }
    }
}

impl ContactSubmission {
    /// Validates a raw submission and coerces it into its canonical shape.
    ///
    /// Every rule violation of every field is reported. Unknown fields are
    /// ignored.
    pub fn validate(raw: &Value) -> Result<Self, ValidationError> {
        let Value::Object(obj) = raw else {
            return Err(ValidationError::body(
                "El cuerpo de la solicitud debe ser un objeto JSON.",
            ));
        };

        let mut v = Validator {
            obj,
            errors: Vec::new(),
        };

        let name = v.field(&["nombre", "name"], validate_name);
        let email = v.field(&["email"], validate_email);
        let phone = v.field(&["telefono", "phone"], validate_phone).flatten();
        let program = v
            .field(&["carrera", "program"], |value| {
                validate_catalog::<Program>(value, "La carrera seleccionada no es válida.")
            })
            .flatten();
        let interest_type = v
            .field(&["tipoInteres", "interestType"], |value| {
                validate_catalog::<InterestType>(
                    value,
                    "El tipo de interés seleccionado no es válido.",
                )
                .and_then(|interest| match interest {
                    Some(interest) if !interest.is_offered() => {
                        Err(vec!["El tipo de interés seleccionado no es válido.".into()])
                    }
                    interest => Ok(interest),
                })
            })
            .flatten();
        let message = v.field(&["mensaje", "message"], validate_message).flatten();
        let study_year = v
            .field(&["anioEstudio", "studyYear"], |value| {
                validate_catalog::<StudyYear>(
                    value,
                    "El año de estudio seleccionado no es válido.",
                )
            })
            .flatten();
        let send_confirmation = v
            .field(
                &["enviarConfirmacion", "sendConfirmation"],
                validate_send_confirmation,
            )
            .unwrap_or(true);

        match (name, email) {
            (Some(name), Some(email)) if v.errors.is_empty() => Ok(Self {
                name,
                email,
                phone,
                program,
                interest_type,
                message,
                study_year,
                send_confirmation,
            }),
            _ => Err(ValidationError { errors: v.errors }),
        }
    }

    /// Strips script blocks from the free text fields.
    pub fn sanitize(mut self) -> Self {
        if let Ok(name) = ContactName::try_new(sanitize_str(&self.name)) {
            self.name = name;
        }
        self.message = self
            .message
            .and_then(|message| ContactMessage::try_new(sanitize_str(&message)).ok());
        self
    }
}

type FieldResult<T> = Result<T, Vec<String>>;

struct Validator<'a> {
    obj: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl Validator<'_> {
    /// Runs `check` on the first of `keys` present in the input and records
    /// its violations under that key.
    fn field<T>(
        &mut self,
        keys: &[&'static str],
        check: impl FnOnce(Option<&Value>) -> FieldResult<T>,
    ) -> Option<T> {
        let (key, value) = keys
            .iter()
            .find_map(|&key| self.obj.get(key).map(|value| (key, Some(value))))
            .unwrap_or((keys[0], None));

        match check(value) {
            Ok(value) => Some(value),
            Err(messages) => {
                self.errors
                    .extend(messages.into_iter().map(|message| FieldError {
                        field: key.into(),
                        message,
                    }));
                None
            }
        }
    }
}

fn expect_string(value: Option<&Value>) -> FieldResult<Option<&str>> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(vec!["El valor debe ser un texto.".into()]),
    }
}

fn validate_name(value: Option<&Value>) -> FieldResult<ContactName> {
    let name = expect_string(value)?.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(vec!["El nombre es obligatorio.".into()]);
    }

    let mut messages = Vec::new();
    let length = name.chars().count();
    if length < ContactName::MIN_LENGTH {
        messages.push("El nombre debe tener al menos 2 caracteres.".into());
    }
    if length > ContactName::MAX_LENGTH {
        messages.push("El nombre no debe exceder los 100 caracteres.".into());
    }
    if !CONTACT_NAME_REGEX.is_match(name) {
        messages.push("El nombre solo puede contener letras y espacios.".into());
    }
    if !messages.is_empty() {
        return Err(messages);
    }

    ContactName::try_new(name).map_err(|err| vec![err.to_string()])
}

fn validate_email(value: Option<&Value>) -> FieldResult<ContactEmail> {
    let email = expect_string(value)?.unwrap_or_default();
    if email.is_empty() {
        return Err(vec!["El correo electrónico es obligatorio.".into()]);
    }

    let mut messages = Vec::new();
    if !CONTACT_EMAIL_REGEX.is_match(email) {
        messages.push("El correo electrónico no es válido.".into());
    }
    if email.chars().count() > ContactEmail::MAX_LENGTH {
        messages.push("El correo electrónico no debe exceder los 255 caracteres.".into());
    }
    if !messages.is_empty() {
        return Err(messages);
    }

    ContactEmail::try_new(email).map_err(|err| vec![err.to_string()])
}

fn validate_phone(value: Option<&Value>) -> FieldResult<Option<PhoneNumber>> {
    let Some(phone) = expect_string(value)?.filter(|phone| !phone.is_empty()) else {
        return Ok(None);
    };

    if !PHONE_NUMBER_REGEX.is_match(phone) {
        return Err(vec![format!(
            "Formato de teléfono guatemalteco no válido. Ejemplo: {}",
            PhoneNumber::EXAMPLE
        )]);
    }

    PhoneNumber::try_new(phone)
        .map(Some)
        .map_err(|err| vec![err.to_string()])
}

fn validate_message(value: Option<&Value>) -> FieldResult<Option<ContactMessage>> {
    let Some(message) = expect_string(value)?
        .map(str::trim)
        .filter(|message| !message.is_empty())
    else {
        return Ok(None);
    };

    if message.chars().count() > ContactMessage::MAX_LENGTH {
        return Err(vec!["El mensaje no puede exceder 500 caracteres".into()]);
    }

    ContactMessage::try_new(message)
        .map(Some)
        .map_err(|err| vec![err.to_string()])
}

fn validate_catalog<T: std::str::FromStr>(
    value: Option<&Value>,
    invalid_message: &str,
) -> FieldResult<Option<T>> {
    expect_string(value)?
        .map(|s| s.parse().map_err(|_| vec![invalid_message.into()]))
        .transpose()
}

fn validate_send_confirmation(value: Option<&Value>) -> FieldResult<bool> {
    match value {
        None => Ok(true),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(false),
        Some(_) => Err(vec!["El valor debe ser verdadero o falso.".into()]),
    }
}
