pub mod assets;
pub use self::assets::{home, Assets};

pub mod authorize;
pub use self::authorize::authorize;

pub mod users;
pub use self::users::{authorized_user, user, user_create, user_delete, user_list, user_update};
