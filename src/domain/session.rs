/// Session details exposed by the host shell: the signed-in locale and the
/// locales the deployment permits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub locale: String,
    pub allowed_locales: Vec<String>,
}
