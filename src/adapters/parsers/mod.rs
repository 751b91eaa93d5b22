pub mod pem_certificate;
