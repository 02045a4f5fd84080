/// Scroll position of a widget's content inside its viewport, measured in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn page_size(&self) -> u32 {
        self.viewport_h.saturating_sub(1).max(1) as u32
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn to_bottom(&mut self) {
        self.y = self.max_y();
    }

    /// Scrolls the minimum amount needed for content row `row` to be inside the viewport.
    pub fn ensure_row_visible(&mut self, row: u32) {
        let h = self.viewport_h as u32;
        if h == 0 {
            return;
        }
        if row < self.y {
            self.y = row;
        } else if row >= self.y + h {
            self.y = row + 1 - h;
        }
        self.clamp();
    }

    pub fn is_scrollable_y(&self) -> bool {
        self.content_h > self.viewport_h as u32
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }
}
