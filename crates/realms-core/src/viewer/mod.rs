mod zoom;

pub use zoom::{Cursor, Mode, Point, ZoomView, DOUBLE_CLICK_SCALE, MAX_SCALE, MIN_SCALE, WHEEL_SENSITIVITY};
