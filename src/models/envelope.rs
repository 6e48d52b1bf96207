use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Pagination info attached to paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: usize,
    pub total_pages: usize,
}

/// The uniform result every `PortalApi` operation resolves to.
///
/// Serialises to `{"success":true,"data":..,"meta":..}` or
/// `{"success":false,"error":".."}` so JSON callers can branch on `success`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success { data: T, meta: Option<PageMeta> },
    Failure { error: String },
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Envelope::Success { data, meta: None }
    }

    pub fn paged(data: T, meta: PageMeta) -> Self {
        Envelope::Success { data, meta: Some(meta) }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Envelope::Failure { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success { data, .. } => Some(data),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        match self {
            Envelope::Success { meta, .. } => meta.as_ref(),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Envelope::Success { data, .. } => Ok(data),
            Envelope::Failure { error } => Err(error),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Success { data, meta } => {
                let len = if meta.is_some() { 3 } else { 2 };
                let mut state = serializer.serialize_struct("Envelope", len)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                if let Some(meta) = meta {
                    state.serialize_field("meta", meta)?;
                }
                state.end()
            }
            Envelope::Failure { error } => {
                let mut state = serializer.serialize_struct("Envelope", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}
