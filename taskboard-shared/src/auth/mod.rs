/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Bearer-token extraction and the authenticated-user context
/// - [`authorization`]: Resource ownership checks
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id in PHC string format, random per-hash salt
/// - **JWT Tokens**: HS256 signing with issuer and expiration validation
/// - **Constant-time Comparison**: Password verification never short-circuits

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
