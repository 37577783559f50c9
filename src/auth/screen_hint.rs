use strum::AsRefStr;

///
/// Screen identity provider presents first
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum ScreenHint {
    #[strum(serialize = "login")]
    Login,

    #[strum(serialize = "signup")]
    SignUp,
}
