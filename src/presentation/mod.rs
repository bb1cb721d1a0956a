mod fields;
mod footer;
mod hit;
mod toasts;
mod view;

pub use hit::{HitMap, HitTarget, ListRows};
pub use view::{ToastRender, UiContext, draw};
