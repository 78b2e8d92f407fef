//! Stroke data for the vector font
//!
//! Coordinates are `(x, y)` in a 0..=100 box; lowercase descenders reach 115.
//! Every stroke is an open polyline drawn point to point.

use super::Glyph;

/// `0` to `9`
static DIGITS: [Glyph; 10] = [
    Glyph::new(&[
        &[(20, 10), (80, 10), (95, 25), (95, 75), (80, 90), (20, 90), (5, 75), (5, 25), (20, 10)],
    ]),
    Glyph::new(&[
        &[(30, 20), (50, 10), (50, 90)],
        &[(30, 90), (70, 90)],
    ]),
    Glyph::new(&[
        &[(10, 25), (25, 10), (75, 10), (90, 25), (90, 40), (10, 75), (10, 90), (90, 90)],
    ]),
    Glyph::new(&[
        &[(10, 10), (80, 10), (90, 20), (90, 40), (75, 50)],
        &[(45, 50), (75, 50)],
        &[(75, 50), (90, 60), (90, 80), (80, 90), (10, 90)],
    ]),
    Glyph::new(&[
        &[(70, 10), (70, 90)],
        &[(10, 60), (90, 60)],
        &[(10, 60), (70, 10)],
    ]),
    Glyph::new(&[
        &[(85, 10), (15, 10), (10, 15), (10, 45), (20, 50), (75, 50), (90, 60), (90, 80), (75, 90), (10, 90)],
    ]),
    Glyph::new(&[
        &[(80, 10), (25, 10), (10, 25), (10, 75), (25, 90), (75, 90), (90, 75), (90, 55), (75, 45), (10, 45)],
    ]),
    Glyph::new(&[
        &[(10, 10), (90, 10), (90, 20), (45, 90)],
        &[(30, 50), (70, 50)],
    ]),
    Glyph::new(&[
        &[(25, 10), (75, 10), (90, 20), (90, 40), (75, 50), (25, 50), (10, 40), (10, 20), (25, 10)],
        &[(25, 50), (75, 50), (90, 60), (90, 80), (75, 90), (25, 90), (10, 80), (10, 60), (25, 50)],
    ]),
    Glyph::new(&[
        &[(90, 55), (25, 55), (10, 45), (10, 25), (25, 10), (75, 10), (90, 25), (90, 75), (75, 90), (20, 90)],
    ]),
];

/// `A` to `Z`
static UPPERCASE: [Glyph; 26] = [
    Glyph::new(&[
        &[(5, 90), (5, 75), (20, 10), (80, 10), (95, 75), (95, 90)],
        &[(20, 60), (80, 60)],
    ]),
    Glyph::new(&[
        &[(10, 10), (10, 90), (75, 90), (90, 75), (90, 55), (75, 45)],
        &[(10, 45), (75, 45), (90, 35), (90, 20), (75, 10), (10, 10)],
    ]),
    Glyph::new(&[
        &[(90, 25), (75, 10), (25, 10), (10, 25), (10, 75), (25, 90), (75, 90), (90, 75)],
    ]),
    Glyph::new(&[
        &[(10, 10), (10, 90), (70, 90), (90, 70), (90, 30), (70, 10), (10, 10)],
    ]),
    Glyph::new(&[
        &[(90, 10), (10, 10), (10, 90), (90, 90)],
        &[(10, 50), (70, 50)],
    ]),
    Glyph::new(&[
        &[(90, 10), (10, 10), (10, 90)],
        &[(10, 50), (70, 50)],
    ]),
    Glyph::new(&[
        &[(90, 25), (75, 10), (25, 10), (10, 25), (10, 75), (25, 90), (75, 90), (90, 75), (90, 50), (50, 50)],
    ]),
    Glyph::new(&[
        &[(10, 10), (10, 90)],
        &[(90, 10), (90, 90)],
        &[(10, 50), (90, 50)],
    ]),
    Glyph::new(&[
        &[(30, 10), (70, 10)],
        &[(50, 10), (50, 90)],
        &[(30, 90), (70, 90)],
    ]),
    Glyph::new(&[
        &[(30, 10), (90, 10)],
        &[(70, 10), (70, 75), (55, 90), (25, 90), (10, 75)],
    ]),
    Glyph::new(&[
        &[(10, 10), (10, 90)],
        &[(90, 10), (10, 50), (90, 90)],
    ]),
    Glyph::new(&[
        &[(10, 10), (10, 90), (90, 90)],
    ]),
    Glyph::new(&[
        &[(5, 90), (5, 20), (15, 10), (50, 45), (85, 10), (95, 20), (95, 90)],
    ]),
    Glyph::new(&[
        &[(10, 90), (10, 20), (20, 10), (90, 80), (90, 10)],
    ]),
    Glyph::new(&[
        &[(20, 10), (80, 10), (95, 25), (95, 75), (80, 90), (20, 90), (5, 75), (5, 25), (20, 10)],
    ]),
    Glyph::new(&[
        &[(10, 90), (10, 10), (75, 10), (90, 25), (90, 40), (75, 55), (10, 55)],
    ]),
    Glyph::new(&[
        &[(20, 10), (80, 10), (95, 25), (95, 75), (80, 90), (20, 90), (5, 75), (5, 25), (20, 10)],
        &[(60, 65), (95, 95)],
    ]),
    Glyph::new(&[
        &[(10, 90), (10, 10), (75, 10), (90, 25), (90, 40), (75, 55), (10, 55)],
        &[(55, 55), (90, 90)],
    ]),
    Glyph::new(&[
        &[(90, 25), (75, 10), (25, 10), (10, 25), (10, 40), (25, 50), (75, 50), (90, 60), (90, 75), (75, 90), (25, 90), (10, 75)],
    ]),
    Glyph::new(&[
        &[(10, 10), (90, 10)],
        &[(50, 10), (50, 90)],
    ]),
    Glyph::new(&[
        &[(10, 10), (10, 75), (25, 90), (75, 90), (90, 75), (90, 10)],
    ]),
    Glyph::new(&[
        &[(5, 10), (50, 90), (95, 10)],
    ]),
    Glyph::new(&[
        &[(5, 10), (20, 90), (50, 55), (80, 90), (95, 10)],
    ]),
    Glyph::new(&[
        &[(10, 10), (90, 90)],
        &[(90, 10), (10, 90)],
    ]),
    Glyph::new(&[
        &[(10, 10), (50, 50), (90, 10)],
        &[(50, 50), (50, 90)],
    ]),
    Glyph::new(&[
        &[(10, 10), (90, 10), (10, 90), (90, 90)],
    ]),
];

/// `a` to `z`
static LOWERCASE: [Glyph; 26] = [
    Glyph::new(&[
        &[(85, 90), (85, 45), (70, 30), (25, 30), (10, 45), (10, 60), (25, 75), (85, 75)],
        &[(85, 75), (85, 90)],
    ]),
    Glyph::new(&[
        &[(15, 10), (15, 90), (70, 90), (85, 75), (85, 45), (70, 30), (15, 30)],
    ]),
    Glyph::new(&[
        &[(85, 40), (70, 30), (25, 30), (10, 45), (10, 75), (25, 90), (70, 90), (85, 80)],
    ]),
    Glyph::new(&[
        &[(85, 10), (85, 90), (30, 90), (15, 75), (15, 45), (30, 30), (85, 30)],
    ]),
    Glyph::new(&[
        &[(10, 60), (85, 60), (85, 45), (70, 30), (25, 30), (10, 45), (10, 75), (25, 90), (70, 90), (85, 80)],
    ]),
    Glyph::new(&[
        &[(85, 20), (70, 10), (45, 10), (30, 25), (30, 90)],
        &[(15, 45), (55, 45)],
    ]),
    Glyph::new(&[
        &[(85, 30), (30, 30), (15, 45), (15, 70), (30, 85), (85, 85), (85, 105), (70, 115), (25, 115), (10, 105)],
    ]),
    Glyph::new(&[
        &[(15, 10), (15, 90)],
        &[(15, 45), (30, 30), (70, 30), (85, 45), (85, 90)],
    ]),
    Glyph::new(&[
        &[(50, 30), (50, 90)],
        &[(50, 10), (55, 15), (50, 20), (45, 15), (50, 10)],
    ]),
    Glyph::new(&[
        &[(60, 30), (60, 100), (45, 115), (20, 115)],
        &[(60, 10), (65, 15), (60, 20), (55, 15), (60, 10)],
    ]),
    Glyph::new(&[
        &[(15, 10), (15, 90)],
        &[(80, 30), (15, 60), (85, 90)],
    ]),
    Glyph::new(&[
        &[(50, 10), (50, 90)],
    ]),
    Glyph::new(&[
        &[(10, 90), (10, 30), (25, 30), (40, 45), (40, 90)],
        &[(40, 45), (55, 30), (75, 30), (90, 45), (90, 90)],
    ]),
    Glyph::new(&[
        &[(15, 90), (15, 30), (30, 30), (70, 30), (85, 45), (85, 90)],
    ]),
    Glyph::new(&[
        &[(25, 30), (75, 30), (90, 45), (90, 75), (75, 90), (25, 90), (10, 75), (10, 45), (25, 30)],
    ]),
    Glyph::new(&[
        &[(15, 115), (15, 30), (70, 30), (85, 45), (85, 70), (70, 85), (15, 85)],
    ]),
    Glyph::new(&[
        &[(85, 115), (85, 30), (30, 30), (15, 45), (15, 70), (30, 85), (85, 85)],
    ]),
    Glyph::new(&[
        &[(20, 90), (20, 30)],
        &[(20, 50), (35, 35), (60, 30), (85, 35)],
    ]),
    Glyph::new(&[
        &[(85, 40), (70, 30), (30, 30), (15, 40), (15, 50), (30, 60), (70, 60), (85, 70), (85, 80), (70, 90), (30, 90), (15, 80)],
    ]),
    Glyph::new(&[
        &[(40, 10), (40, 75), (55, 90), (80, 90)],
        &[(20, 30), (65, 30)],
    ]),
    Glyph::new(&[
        &[(15, 30), (15, 75), (30, 90), (70, 90), (85, 75), (85, 30)],
    ]),
    Glyph::new(&[
        &[(10, 30), (50, 90), (90, 30)],
    ]),
    Glyph::new(&[
        &[(5, 30), (25, 90), (50, 50), (75, 90), (95, 30)],
    ]),
    Glyph::new(&[
        &[(15, 30), (85, 90)],
        &[(85, 30), (15, 90)],
    ]),
    Glyph::new(&[
        &[(15, 30), (50, 75)],
        &[(85, 30), (50, 75), (35, 100), (20, 115)],
    ]),
    Glyph::new(&[
        &[(15, 30), (85, 30), (15, 90), (85, 90)],
    ]),
];

/// `:` as two diamonds
static COLON: Glyph = Glyph::new(&[
    &[(50, 25), (58, 33), (50, 41), (42, 33), (50, 25)],
    &[(50, 59), (58, 67), (50, 75), (42, 67), (50, 59)],
]);

/// `-`
static MINUS: Glyph = Glyph::new(&[
    &[(15, 50), (85, 50)],
]);

/// `.` as a diamond
static PERIOD: Glyph = Glyph::new(&[
    &[(50, 80), (58, 85), (50, 90), (42, 85), (50, 80)],
]);

/// `/`
static SLASH: Glyph = Glyph::new(&[
    &[(85, 10), (15, 90)],
]);

/// `%`
static PERCENT: Glyph = Glyph::new(&[
    &[(85, 10), (15, 90)],
    &[(15, 10), (35, 10), (40, 15), (40, 30), (35, 35), (15, 35), (10, 30), (10, 15), (15, 10)],
    &[(65, 65), (85, 65), (90, 70), (90, 85), (85, 90), (65, 90), (60, 85), (60, 70), (65, 65)],
]);

/// `°`
static DEGREE: Glyph = Glyph::new(&[
    &[(30, 10), (70, 10), (85, 25), (85, 40), (70, 55), (30, 55), (15, 40), (15, 25), (30, 10)],
]);

/// Strokes for `c`, if the font has it
pub fn glyph(c: char) -> Option<&'static Glyph> {
    match c {
        '0'..='9' => Some(&DIGITS[c as usize - '0' as usize]),
        'A'..='Z' => Some(&UPPERCASE[c as usize - 'A' as usize]),
        'a'..='z' => Some(&LOWERCASE[c as usize - 'a' as usize]),
        ':' => Some(&COLON),
        '-' => Some(&MINUS),
        '.' => Some(&PERIOD),
        '/' => Some(&SLASH),
        '%' => Some(&PERCENT),
        '\u{b0}' => Some(&DEGREE),
        _ => None,
    }
}
