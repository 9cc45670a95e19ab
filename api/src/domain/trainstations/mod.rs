pub mod trainstation;
