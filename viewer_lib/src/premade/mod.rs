pub mod transfer_functions;
