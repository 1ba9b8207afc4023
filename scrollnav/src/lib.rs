pub mod debounce;
pub mod dom;
pub mod event;
pub mod hit;
pub mod layout;
pub mod nav;
pub mod scroll;
pub mod text;
pub mod types;

pub use debounce::Debouncer;
pub use dom::{find_element, find_element_mut, Content, Element};
pub use event::{translate, Event, MouseButton};
pub use hit::hit_test;
pub use layout::{layout, LayoutResult, Rect};
pub use nav::{NavOptions, ScrollNav};
pub use scroll::ScrollState;
pub use types::*;
