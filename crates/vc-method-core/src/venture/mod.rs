pub mod sensitivity;
pub mod vc_method;
