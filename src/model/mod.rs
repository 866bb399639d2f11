mod ids;
mod language;
mod user;

pub use self::ids::{ObjectId, random_bytes, to_hex};
pub use self::language::{CountResponse, Culture, Language, LanguageResource};
pub use self::user::{
    AuthResponse, Credentials, FederatedKind, FederatedProfile, FederatedProvider, LocalProvider,
    Providers, RefreshRequest, RegisterRequest, User, UserUpdate,
};
