pub mod curve_types;
pub mod secp256k1;
