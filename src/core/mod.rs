mod wardrobe;

pub use wardrobe::{run_doctor, Wardrobe};
