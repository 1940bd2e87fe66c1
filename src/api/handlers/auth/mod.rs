//! Credential authentication: signup, login, sessions, and the route guard.
//!
//! Validation collects every failing field check before answering, so a form
//! renders all of its errors at once. Login failures are deliberately vague
//! ("Invalid email or password") whether the email is unknown or the password
//! is wrong, to resist account enumeration.
//!
//! Email uniqueness is enforced by the database constraint, not a pre-check:
//! the INSERT races and the loser maps SQLSTATE 23505 to a conflict response.

pub(crate) mod guard;
pub(crate) mod login;
pub(crate) mod password;
pub(crate) mod session;
pub(crate) mod signup;
pub(crate) mod storage;
pub(crate) mod token;
pub(crate) mod types;
pub(crate) mod validate;
