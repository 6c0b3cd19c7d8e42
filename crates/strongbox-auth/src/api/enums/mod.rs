mod grant_type;
pub(crate) use grant_type::GrantType;
mod scope;
pub(crate) use scope::Scope;
mod two_factor_provider;
pub use two_factor_provider::TwoFactorProvider;
