use wasm_bindgen::prelude::*;

mod page;
use page::ShockText;

shock_web::export_page!(ShockText, "shock-text");
