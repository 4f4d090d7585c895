mod guild;
mod store;
mod user;
