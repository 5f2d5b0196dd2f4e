#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub fill_max_width: bool,
    /// Fraction of the parent's height, `Some(1.0)` for full height.
    pub fill_max_height: Option<f32>,
    pub padding: Option<PaddingValues>,
    pub horizontal_alignment: Alignment,
    pub vertical_arrangement: Alignment,
    /// Vertical offset as a fraction of the element's own height.
    pub offset_fraction_y: Option<f32>,
    pub alpha: Option<f32>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_max_size(mut self) -> Self {
        self.fill_max_width = true;
        self.fill_max_height = Some(1.0);
        self
    }

    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_width = true;
        self
    }

    pub fn fill_max_height(mut self, fraction: f32) -> Self {
        self.fill_max_height = Some(fraction.clamp(0.0, 1.0));
        self
    }

    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(PaddingValues {
            left: v,
            right: v,
            top: v,
            bottom: v,
        });
        self
    }

    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn center_horizontally(mut self) -> Self {
        self.horizontal_alignment = Alignment::Center;
        self
    }

    pub fn center_vertically(mut self) -> Self {
        self.vertical_arrangement = Alignment::Center;
        self
    }

    pub fn offset_fraction_y(mut self, fraction: f32) -> Self {
        self.offset_fraction_y = Some(fraction);
        self
    }

    pub fn alpha(mut self, a: f32) -> Self {
        self.alpha = Some(a.clamp(0.0, 1.0));
        self
    }
}
