//! Closed option catalogs offered by the contact form.

use thiserror::Error;

use crate::macros::catalog;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown catalog value: {0:?}")]
pub struct UnknownCatalogValue(pub String);

catalog! {
    /// Faculty grouping of an academic program.
    pub enum ProgramCategory {
        Engineering("ingenieria", "Ingeniería"),
        BusinessSchool("bridge", "Bridge Business School"),
        Education("educacion", "Educación"),
        UniversityCollege("colegio-universitario", "Colegio Universitario"),
        Architecture("arquitectura", "Arquitectura"),
        SciencesHumanities("ciencias-humanidades", "Ciencias y Humanidades"),
        SocialSciences("ciencias-sociales", "Ciencias Sociales"),
        DesignArts("design-arts", "Design Innovation & Arts"),
        General("general", "General"),
    }
}

catalog! {
    /// Academic program (`carrera`) of the person contacting the project.
    pub enum Program { category: ProgramCategory } {
        IngBiomedica("ing-biomedica", "Ingeniería Biomédica", ProgramCategory::Engineering),
        IngBiotecnologiaIndustrial("ing-biotecnologia-industrial", "Ingeniería en Biotecnología Industrial", ProgramCategory::Engineering),
        IngCienciaAdministracion("ing-ciencia-administracion", "Ingeniería en Ciencia de la Administración", ProgramCategory::Engineering),
        IngCienciasAlimentos("ing-ciencias-alimentos", "Ingeniería en Ciencias de Alimentos", ProgramCategory::Engineering),
        IngCienciasAlimentosIndustrial("ing-ciencias-alimentos-industrial", "Ingeniería en Ciencias de Alimentos Industrial", ProgramCategory::Engineering),
        IngCivil("ing-civil", "Ingeniería Civil", ProgramCategory::Engineering),
        IngCivilArquitectonica("ing-civil-arquitectonica", "Ingeniería Civil Arquitectónica", ProgramCategory::Engineering),
        IngCienciaComputacion("ing-ciencia-computacion", "Ingeniería en Ciencia de la Computación y TI", ProgramCategory::Engineering),
        IngSistemasInformacion("ing-sistemas-informacion", "Ingeniería en Sistemas de Información Computacional", ProgramCategory::Engineering),
        IngElectronica("ing-electronica", "Ingeniería Electrónica", ProgramCategory::Engineering),
        IngIndustrial("ing-industrial", "Ingeniería Industrial", ProgramCategory::Engineering),
        IngMecanica("ing-mecanica", "Ingeniería Mecánica", ProgramCategory::Engineering),
        IngMecanicaIndustrial("ing-mecanica-industrial", "Ingeniería Mecánica Industrial", ProgramCategory::Engineering),
        IngMecatronica("ing-mecatronica", "Ingeniería Mecatrónica", ProgramCategory::Engineering),
        IngQuimica("ing-quimica", "Ingeniería Química", ProgramCategory::Engineering),
        IngQuimicaIndustrial("ing-quimica-industrial", "Ingeniería Química Industrial", ProgramCategory::Engineering),

        BridgeCienciaAdministracion("bridge-ciencia-administracion", "Ing. en Ciencia de la Administración (Bridge)", ProgramCategory::BusinessSchool),
        BridgeAdministracionEmpresas("bridge-administracion-empresas", "Administración de Empresas", ProgramCategory::BusinessSchool),
        BridgeMarketingBusiness("bridge-marketing-business", "International Marketing and Business Analytics", ProgramCategory::BusinessSchool),
        BridgeComunicacionEstrategica("bridge-comunicacion-estrategica", "Comunicación Estratégica", ProgramCategory::BusinessSchool),

        EduMusica("edu-musica", "Profesorado en Educación Musical", ProgramCategory::Education),
        EduEnglish("edu-english", "Profesorado en English Language Teaching (ELT)", ProgramCategory::Education),
        EduInclusiva("edu-inclusiva", "Profesorado en Educación Inclusiva", ProgramCategory::Education),
        EduPrimaria("edu-primaria", "Profesorado en Educación Primaria (Virtual)", ProgramCategory::Education),
        EduAprendizaje("edu-aprendizaje", "Profesorado en Problemas del Aprendizaje", ProgramCategory::Education),
        EduMatematicaFisica("edu-matematica-fisica", "Profesorado en Matemática y Ciencias Físicas", ProgramCategory::Education),
        EduQuimicaBiologia("edu-quimica-biologia", "Profesorado en Ciencias Químicas y Biológicas", ProgramCategory::Education),
        EduCienciasSociales("edu-ciencias-sociales", "Profesorado en Ciencias Sociales", ProgramCategory::Education),
        EduComunicacionLenguaje("edu-comunicacion-lenguaje", "Profesorado en Comunicación y Lenguaje", ProgramCategory::Education),

        CuBaccalaureatusArtibus("cu-baccalaureatus-artibus", "Baccalaureatus en Artibus", ProgramCategory::UniversityCollege),
        CuBaccalaureatusScientiis("cu-baccalaureatus-scientiis", "Baccalaureatus en Scientiis", ProgramCategory::UniversityCollege),

        Arquitectura("arquitectura", "Arquitectura", ProgramCategory::Architecture),

        Biologia("biologia", "Biología", ProgramCategory::SciencesHumanities),
        BioquimicaMicrobiologia("bioquimica-microbiologia", "Bioquímica y Microbiología", ProgramCategory::SciencesHumanities),
        BiotecnologiaMolecular("biotecnologia-molecular", "Biotecnología Molecular", ProgramCategory::SciencesHumanities),
        Fisica("fisica", "Física", ProgramCategory::SciencesHumanities),
        MatematicaAplicada("matematica-aplicada", "Matemática Aplicada", ProgramCategory::SciencesHumanities),
        Nutricion("nutricion", "Nutrición", ProgramCategory::SciencesHumanities),
        Quimica("quimica", "Química", ProgramCategory::SciencesHumanities),
        QuimicaFarmaceutica("quimica-farmaceutica", "Química Farmacéutica", ProgramCategory::SciencesHumanities),

        Antropologia("antropologia", "Antropología", ProgramCategory::SocialSciences),
        Arqueologia("arqueologia", "Arqueología", ProgramCategory::SocialSciences),
        Psicologia("psicologia", "Psicología", ProgramCategory::SocialSciences),
        RelacionesInternacionales("relaciones-internacionales", "Relaciones Internacionales", ProgramCategory::SocialSciences),

        ComposicionProduccionMusical("composicion-produccion-musical", "Composición y Producción Musical", ProgramCategory::DesignArts),
        DisenoProductoInnovacion("diseno-producto-innovacion", "Diseño de Producto e Innovación", ProgramCategory::DesignArts),

        Otra("otra", "Otra carrera", ProgramCategory::General),
        NoEspecificada("no-especificada", "Prefiero no especificar", ProgramCategory::General),
        Graduado("graduado", "Ya soy graduado/a", ProgramCategory::General),
        Maestria("maestria", "Estudiante de Maestría", ProgramCategory::General),
        Doctorado("doctorado", "Estudiante de Doctorado", ProgramCategory::General),
        Prospecto("prospecto", "Prospecto/Interesado en estudiar", ProgramCategory::General),
    }
}

catalog! {
    /// Kind of collaboration (`tipoInteres`) the person is interested in.
    pub enum InterestType { description: &'static str } {
        VoluntarioCampo("voluntario-campo", "Voluntario en trabajo de campo", "Participar en actividades de conservación directa"),
        Investigacion("investigacion", "Apoyo en investigación", "Colaborar en estudios científicos del proyecto"),
        Divulgacion("divulgacion", "Divulgación y educación ambiental", "Ayudar en actividades educativas y de concientización"),
        Monitoreo("monitoreo", "Monitoreo ambiental", "Participar en el seguimiento de la calidad del agua y ecosistema"),
        Financiamiento("financiamiento", "Apoyo financiero/donación", "Contribuir económicamente al proyecto"),
        Difusion("difusion", "Difusión en redes sociales", "Ayudar a promocionar el proyecto digitalmente"),
        FotografiaVideo("fotografia-video", "Fotografía y video", "Documentar visualmente las actividades"),
        Informacion("informacion", "Solo quiero más información", "Conocer mejor el proyecto antes de decidir"),
        Otro("otro", "Otro tipo de colaboración", "Tengo una idea específica de cómo contribuir"),
        /// Only kept for its confirmation message. The form does not offer it,
        /// so the validator rejects it and its label and description are never
        /// shown.
        Tesis("tesis", "Tesis", ""),
        /// Only kept for its confirmation message, see [`Self::Tesis`].
        ServicioSocial("servicio-social", "Servicio social", ""),
        /// Only kept for its confirmation message, see [`Self::Tesis`].
        PracticaProfesional("practica-profesional", "Práctica profesional", ""),
    }
}

impl InterestType {
    /// Interest types offered by the contact form.
    pub const OFFERED: &'static [Self] = &[
        Self::VoluntarioCampo,
        Self::Investigacion,
        Self::Divulgacion,
        Self::Monitoreo,
        Self::Financiamiento,
        Self::Difusion,
        Self::FotografiaVideo,
        Self::Informacion,
        Self::Otro,
    ];

    pub fn is_offered(self) -> bool {
        Self::OFFERED.contains(&self)
    }

    pub const DEFAULT_CONFIRMATION_MESSAGE: &'static str =
        "Nuestro equipo revisará tu solicitud y te contactará pronto.";

    /// Message included in the confirmation email sent back to the person.
    pub fn confirmation_message(interest: Option<Self>) -> &'static str {
        let Some(interest) = interest else {
            return Self::DEFAULT_CONFIRMATION_MESSAGE;
        };

        match interest {
            Self::VoluntarioCampo => {
                "Te contactaremos para coordinar actividades de campo y conservación."
            }
            Self::Investigacion => "Nuestro equipo de investigación se pondrá en contacto contigo.",
            Self::Divulgacion => "Te incluiremos en nuestras actividades de educación ambiental.",
            Self::Financiamiento => {
                "Un coordinador del proyecto te contactará para discutir opciones de apoyo."
            }
            Self::Tesis => "Te conectaremos con supervisores para proyectos de investigación.",
            Self::ServicioSocial => {
                "Te ayudaremos a estructurar tu servicio social con el proyecto."
            }
            Self::PracticaProfesional => {
                "Coordinaremos tu práctica profesional con nuestras actividades."
            }
            Self::Monitoreo
            | Self::Difusion
            | Self::FotografiaVideo
            | Self::Informacion
            | Self::Otro => Self::DEFAULT_CONFIRMATION_MESSAGE,
        }
    }
}

catalog! {
    /// Current year of study (`anioEstudio`).
    pub enum StudyYear {
        First("1", "Primer año"),
        Second("2", "Segundo año"),
        Third("3", "Tercer año"),
        Fourth("4", "Cuarto año"),
        Fifth("5", "Quinto año"),
        Graduado("graduado", "Graduado"),
        Maestria("maestria", "Maestría"),
        Doctorado("doctorado", "Doctorado"),
        Otro("otro", "Otro"),
    }
}
