/// One diary entry. The catalog order is the display order: the gallery
/// reports selections by index into [`RESTAURANTS`], so reordering the
/// table reorders the gallery with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Restaurant {
    pub name: &'static str,
    pub image: &'static str,
    pub kind: &'static str,
    pub address: &'static str,
    pub description: &'static str,
    pub coral_review: &'static str,
    pub gabi_review: &'static str,
    /// `YYYY-MM-DD`; entries without a date stay out of the calendar view.
    pub date: Option<&'static str>,
    pub rating: Option<f32>,
    pub price_range: Option<&'static str>,
    pub website: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub hours: Option<&'static str>,
}

impl Restaurant {
    const fn new(
        name: &'static str,
        image: &'static str,
        kind: &'static str,
        address: &'static str,
        description: &'static str,
        coral_review: &'static str,
        gabi_review: &'static str,
        date: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            image,
            kind,
            address,
            description,
            coral_review,
            gabi_review,
            date,
            rating: None,
            price_range: None,
            website: None,
            phone: None,
            hours: None,
        }
    }
}

pub const RESTAURANTS: &[Restaurant] = &[
    Restaurant::new(
        "The Garden Table",
        "/1.webp",
        "農場直送",
        "台北市大安區綠谷路123號",
        "每日嚴選當季食材，呈現最純粹的料理藝術。",
        "食材新鮮度滿分，沙拉超級好吃！環境很舒適。",
        "很適合約會的地方，推薦他們的燉飯！",
        Some("2024-11-23"),
    ),
    Restaurant::new(
        "Ocean Breeze",
        "/2.webp",
        "海鮮料理",
        "高雄市鼓山區港景街45號",
        "港邊高級海鮮餐廳，現撈海產新鮮直送。",
        "龍蝦超新鮮！價格偏高但值得，海景很美。",
        "生魚片入口即化，服務態度很好！",
        Some("2025-01-02"),
    ),
    Restaurant::new(
        "Sakura House",
        "/3.webp",
        "日式料理",
        "台中市西區櫻花巷78號",
        "正宗日式料理，展現職人精神與精緻美學。",
        "壽司師傅手藝一流，必點鮭魚腹！",
        "抹茶甜點超讚，環境很有日本氛圍。",
        Some("2025-01-10"),
    ),
    Restaurant::new(
        "La Maison",
        "/4.webp",
        "法式料理",
        "台北市信義區優雅大道12號",
        "典雅法式餐廳，適合浪漫約會或商務宴請。",
        "法式鵝肝超級嫩，紅酒選擇很多。",
        "燈光氣氛超棒，甜點車是亮點！",
        Some("2024-12-14"),
    ),
    Restaurant::new(
        "Spice Market",
        "/5.webp",
        "東南亞料理",
        "台南市中西區香料街56號",
        "融合泰越料理，香料完美配比的異國風情。",
        "綠咖哩超道地！辣度可以客製化。",
        "河粉湯頭很清爽，份量超大！",
        Some("2025-02-07"),
    ),
    Restaurant::new(
        "Bella Italia",
        "/6.webp",
        "義式料理",
        "新竹市東區托斯卡尼路89號",
        "道地義大利風味，手工義大利麵與窯烤披薩。",
        "披薩餅皮超酥脆，提拉米蘇必點！",
        "松露義大利麵香氣十足，很道地！",
        Some("2024-12-30"),
    ),
    Restaurant::new(
        "The Smokehouse",
        "/7.webp",
        "美式燒烤",
        "桃園市中壢區火焰街34號",
        "低溫慢烤肉品搭配自製醬料，肉食者天堂。",
        "牛胸肉超軟嫩！醬料很特別。",
        "份量超大，適合多人聚餐！",
        None,
    ),
    Restaurant::new(
        "Zen Garden",
        "/8.webp",
        "蔬食料理",
        "台北市松山區和平巷67號",
        "禪意素食，中西融合的豐富蔬食風味。",
        "沒想到素食可以這麼好吃！很清爽。",
        "創意料理很驚艷，環境很放鬆。",
        None,
    ),
];

pub fn restaurant_by_name(name: &str) -> Option<&'static Restaurant> {
    let trimmed = name.trim();
    RESTAURANTS
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(trimmed))
}

const MAP_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Builds the outbound map-search link for an address. Unreserved ASCII
/// passes through; everything else (including multi-byte UTF-8) is
/// percent-encoded per byte, matching `encodeURIComponent` for the
/// characters that actually occur in addresses.
pub fn map_search_url(address: &str) -> String {
    let mut url = String::with_capacity(MAP_SEARCH_BASE.len() + address.len() * 3);
    url.push_str(MAP_SEARCH_BASE);
    for byte in address.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                url.push(*byte as char);
            }
            _ => {
                url.push('%');
                url.push(hex_digit(byte >> 4));
                url.push(hex_digit(byte & 0x0f));
            }
        }
    }
    url
}

fn hex_digit(value: u8) -> char {
    char::from_digit(u32::from(value), 16)
        .unwrap_or('0')
        .to_ascii_uppercase()
}
