pub mod import;
pub mod normalize;
pub mod props;
pub mod styles;

pub use import::{import, ImportArgs};
pub use normalize::{normalize, NormalizeArgs};
pub use props::{props, PropsArgs};
pub use styles::{styles, StylesArgs};
