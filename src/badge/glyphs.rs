pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;
const GLYPH_SPACING: usize = 1;

// Rows top to bottom, three bits per row, high bit leftmost.
const DIGITS: [[u8; GLYPH_HEIGHT]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Integer part of the percentage, as shown in the centre of the badge.
pub fn label(cpu_percent: f32) -> String {
    if cpu_percent.is_nan() || cpu_percent <= 0.0 {
        return "0".to_string();
    }
    (cpu_percent.trunc() as u32).to_string()
}

/// Width of `text` in glyph cells.
pub fn text_width(text: &str) -> usize {
    let n = text.chars().filter(char::is_ascii_digit).count();
    if n == 0 {
        0
    } else {
        n * GLYPH_WIDTH + (n - 1) * GLYPH_SPACING
    }
}

/// Lit `(column, row)` cells of `text`; non-digits are skipped.
pub fn lit_cells(text: &str) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    let digits = text.chars().filter_map(|c| c.to_digit(10));
    for (i, digit) in digits.enumerate() {
        let x0 = i * (GLYPH_WIDTH + GLYPH_SPACING);
        for (row, bits) in DIGITS[digit as usize].iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    cells.push((x0 + col, row));
                }
            }
        }
    }
    cells
}
