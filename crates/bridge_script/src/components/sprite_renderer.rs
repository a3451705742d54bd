use bridge_core::AssetHandle;
use bridge_math::{Color, Vec2};

use crate::assets::{Asset, Texture2D};
use crate::component::component_wrapper;

component_wrapper!(
    /// Renders a textured quad, optionally partially filled.
    SpriteRenderer,
    "SpriteRenderer"
);

impl SpriteRenderer {
    /// Fraction of the sprite drawn along each axis.
    #[must_use]
    pub fn fill(&self) -> Vec2 {
        self.owner.read(self.owner.calls().sprite_renderer_get_fill())
    }

    pub fn set_fill(&self, fill: Vec2) {
        self.owner
            .write(self.owner.calls().sprite_renderer_set_fill(), fill);
    }

    #[must_use]
    pub fn base_color(&self) -> Color {
        self.owner
            .read(self.owner.calls().sprite_renderer_get_base_color())
    }

    pub fn set_base_color(&self, color: Color) {
        self.owner
            .write(self.owner.calls().sprite_renderer_set_base_color(), color);
    }

    /// The sprite texture, or `None` if native reports none.
    #[must_use]
    pub fn sprite(&self) -> Option<Texture2D> {
        let handle: AssetHandle = self
            .owner
            .read(self.owner.calls().sprite_renderer_get_sprite());
        handle
            .is_valid()
            .then(|| Texture2D::from_handle(self.owner.bridge(), handle))
    }

    pub fn set_sprite(&self, sprite: &Texture2D) {
        self.owner
            .write(self.owner.calls().sprite_renderer_set_sprite(), sprite.handle());
    }
}
