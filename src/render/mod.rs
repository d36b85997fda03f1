pub mod flash;
pub mod renderer;
pub mod scene;
pub mod skin;

pub use flash::{Flash, SCORE_POP, START_FLASH};
pub use renderer::Renderer;
pub use scene::{Overlay, Scene, SceneCell};
pub use skin::Skin;
