use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SPEED: &str = "main_menu.speed";
    pub const MAIN_MENU_DUAL: &str = "main_menu.dual";
    pub const MAIN_MENU_RESIDUAL: &str = "main_menu.residual";
    pub const MAIN_MENU_TIMELINE: &str = "main_menu.timeline";
    pub const MAIN_MENU_REPORT: &str = "main_menu.report";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_FOLLOW_DIAMETER: &str = "prompt.follow_diameter";
    pub const PROMPT_K: &str = "prompt.k";
    pub const PROMPT_TAP_AMOUNT: &str = "prompt.tap_amount";
    pub const PROMPT_DAILY_PRODUCTION: &str = "prompt.daily_production";
    pub const PROMPT_ORE_COKE: &str = "prompt.ore_coke";
    pub const PROMPT_TAP_RATIO: &str = "prompt.tap_ratio";
    pub const PROMPT_TFE: &str = "prompt.tfe";
    pub const PROMPT_REDUCTION_RATIO: &str = "prompt.reduction_ratio";
    pub const PROMPT_AIR_FLOW: &str = "prompt.air_flow";
    pub const PROMPT_FURNACE_PRESSURE: &str = "prompt.furnace_pressure";
    pub const PROMPT_OXYGEN: &str = "prompt.oxygen";
    pub const PROMPT_GRANULATION: &str = "prompt.granulation";
    pub const PROMPT_LIFETIME: &str = "prompt.lifetime";
    pub const PROMPT_CAST_COUNT: &str = "prompt.cast_count";
    pub const PROMPT_CAST_DURATION: &str = "prompt.cast_duration";
    pub const PROMPT_SWITCH_GAP: &str = "prompt.switch_gap";

    pub const RESULT_SPEED: &str = "result.speed";
    pub const RESULT_DURATION: &str = "result.duration";
    pub const RESULT_K: &str = "result.k";
    pub const RESULT_TOTAL_SPEED: &str = "result.total_speed";
    pub const RESULT_LEAD_FOLLOW_DURATION: &str = "result.lead_follow_duration";
    pub const RESULT_COMBINED_DURATION: &str = "result.combined_duration";
    pub const RESULT_FOLLOW_DELAY: &str = "result.follow_delay";
    pub const RESULT_FURNACE_OUTPUT: &str = "result.furnace_output";
    pub const RESULT_SLAG: &str = "result.slag";
    pub const RESULT_SLAG_TFE: &str = "result.slag_tfe";
    pub const RESULT_IRON_HOLDUP: &str = "result.iron_holdup";
    pub const RESULT_SLAG_HOLDUP: &str = "result.slag_holdup";
    pub const RESULT_TOTAL_HOLDUP: &str = "result.total_holdup";
    pub const RESULT_BIT: &str = "result.bit";
    pub const RESULT_RECOVERY: &str = "result.recovery";
    pub const RESULT_SCORE: &str = "result.score";
    pub const RESULT_CASTING_TIME: &str = "result.casting_time";
    pub const RESULT_DAILY_OUTPUT: &str = "result.daily_output";
    pub const RESULT_TIMELINE_SPAN: &str = "result.timeline_span";

    pub const TABLE_TIMELINE_HEADER: &str = "table.timeline_header";
    pub const TABLE_SERIES_HEADER: &str = "table.series_header";
    pub const PLANT_PROFILE_HEADING: &str = "plant.heading";
    pub const PLANT_TAPHOLES: &str = "plant.tapholes";
    pub const PLANT_CASTS_PER_DAY: &str = "plant.casts_per_day";
    pub const PLANT_TAP_SPEED: &str = "plant.tap_speed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: &Path) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: load_overrides(pack_dir, lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 권고 문구처럼 한국어 원문이 계산 모듈에 있는 경우에 쓴다.
    pub fn t_or<'a>(&'a self, key: &str, korean: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or(korean),
            Language::Ko => korean,
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().and_then(|loc| normalize_locale_string(&loc)) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let content = fs::read_to_string(dir.join(format!("{lang}.toml"))).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 고로 출선작업 계산기 ===",
        MAIN_MENU_SPEED => "1) 출선 속도/시간",
        MAIN_MENU_DUAL => "2) 2출선구 동시 출선",
        MAIN_MENU_RESIDUAL => "3) 노내 저선량 추정",
        MAIN_MENU_TIMELINE => "4) A/B 출선 일정",
        MAIN_MENU_REPORT => "5) 종합 계산",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PROMPT_DIAMETER => "출선 비트경 (mm)",
        PROMPT_FOLLOW_DIAMETER => "후행 출선구 비트경 (mm)",
        PROMPT_K => "속도 계수 K (ton/min/mm²)",
        PROMPT_TAP_AMOUNT => "1회 출선시 배출량 (ton)",
        PROMPT_DAILY_PRODUCTION => "일일생산량 (ton)",
        PROMPT_ORE_COKE => "Ore/Coke 비율",
        PROMPT_TAP_RATIO => "출선비 (용선:슬래그)",
        PROMPT_TFE => "T.Fe (%)",
        PROMPT_REDUCTION_RATIO => "환원비 (없으면 0)",
        PROMPT_AIR_FLOW => "풍량 (Nm³/min)",
        PROMPT_FURNACE_PRESSURE => "노정압 (kg/cm²)",
        PROMPT_OXYGEN => "산소부화량 (Nm³/hr)",
        PROMPT_GRANULATION => "원료 입도 (mm)",
        PROMPT_LIFETIME => "고로 수명 (년)",
        PROMPT_CAST_COUNT => "출선 횟수",
        PROMPT_CAST_DURATION => "1회 출선시간 (min)",
        PROMPT_SWITCH_GAP => "출선구 전환 간격 (min)",
        RESULT_SPEED => "출선 속도:",
        RESULT_DURATION => "출선 시간:",
        RESULT_K => "역산 K 계수:",
        RESULT_TOTAL_SPEED => "합산 출선 속도:",
        RESULT_LEAD_FOLLOW_DURATION => "선행/후행 단독 출선 시간:",
        RESULT_COMBINED_DURATION => "동시 출선 소요 시간:",
        RESULT_FOLLOW_DELAY => "후행 출선구 개공 지연:",
        RESULT_FURNACE_OUTPUT => "고로 출력:",
        RESULT_SLAG => "슬래그량:",
        RESULT_SLAG_TFE => "T.Fe 기준 슬래그량:",
        RESULT_IRON_HOLDUP => "용선 저선량:",
        RESULT_SLAG_HOLDUP => "슬래그 저선량:",
        RESULT_TOTAL_HOLDUP => "노내 예상 총 저선량:",
        RESULT_BIT => "권장 비트경:",
        RESULT_RECOVERY => "회수율:",
        RESULT_SCORE => "조업지수 점수:",
        RESULT_CASTING_TIME => "출선 작업 시간 예측:",
        RESULT_DAILY_OUTPUT => "하루 예상 총 출선량:",
        RESULT_TIMELINE_SPAN => "일정 총 소요 (A/B 횟수):",
        TABLE_TIMELINE_HEADER => "회차  출선구  시작          종료",
        TABLE_SERIES_HEADER => "시각(min)   누적 용선(ton)  누적 슬래그(ton)  합계(ton)",
        PLANT_PROFILE_HEADING => "현장 프로파일",
        PLANT_TAPHOLES => "가동/전체 출선구",
        PLANT_CASTS_PER_DAY => "일일 출선 횟수",
        PLANT_TAP_SPEED => "출선 속도 (ton/min)",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Blast Furnace Casting Calculator ===",
        MAIN_MENU_SPEED => "1) Tap speed / duration",
        MAIN_MENU_DUAL => "2) Dual tap-hole casting",
        MAIN_MENU_RESIDUAL => "3) Residual melt estimate",
        MAIN_MENU_TIMELINE => "4) A/B cast timeline",
        MAIN_MENU_REPORT => "5) Full report",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_DIAMETER => "Bit diameter (mm)",
        PROMPT_FOLLOW_DIAMETER => "Follow tap-hole bit diameter (mm)",
        PROMPT_K => "Speed coefficient K (ton/min/mm²)",
        PROMPT_TAP_AMOUNT => "Tap amount per cast (ton)",
        PROMPT_DAILY_PRODUCTION => "Daily production (ton)",
        PROMPT_ORE_COKE => "Ore/Coke ratio",
        PROMPT_TAP_RATIO => "Tap ratio (iron:slag)",
        PROMPT_TFE => "T.Fe (%)",
        PROMPT_REDUCTION_RATIO => "Reduction ratio (0 if none)",
        PROMPT_AIR_FLOW => "Air flow (Nm³/min)",
        PROMPT_FURNACE_PRESSURE => "Top pressure (kg/cm²)",
        PROMPT_OXYGEN => "Oxygen enrichment (Nm³/hr)",
        PROMPT_GRANULATION => "Raw material size (mm)",
        PROMPT_LIFETIME => "Furnace campaign age (years)",
        PROMPT_CAST_COUNT => "Number of casts",
        PROMPT_CAST_DURATION => "Cast duration (min)",
        PROMPT_SWITCH_GAP => "Switch gap (min)",
        RESULT_SPEED => "Tap speed:",
        RESULT_DURATION => "Tap duration:",
        RESULT_K => "Back-calculated K:",
        RESULT_TOTAL_SPEED => "Combined tap speed:",
        RESULT_LEAD_FOLLOW_DURATION => "Lead/follow single-hole duration:",
        RESULT_COMBINED_DURATION => "Simultaneous casting duration:",
        RESULT_FOLLOW_DELAY => "Follow tap-hole opening delay:",
        RESULT_FURNACE_OUTPUT => "Furnace output:",
        RESULT_SLAG => "Slag amount:",
        RESULT_SLAG_TFE => "Slag amount (T.Fe basis):",
        RESULT_IRON_HOLDUP => "Iron hold-up:",
        RESULT_SLAG_HOLDUP => "Slag hold-up:",
        RESULT_TOTAL_HOLDUP => "Total hearth hold-up:",
        RESULT_BIT => "Recommended bit:",
        RESULT_RECOVERY => "Recovery rate:",
        RESULT_SCORE => "Operating score:",
        RESULT_CASTING_TIME => "Predicted casting time:",
        RESULT_DAILY_OUTPUT => "Expected daily tap output:",
        RESULT_TIMELINE_SPAN => "Timeline span (A/B casts):",
        TABLE_TIMELINE_HEADER => "Cast  Hole    Start         End",
        TABLE_SERIES_HEADER => "Time(min)   Iron cum.(ton)  Slag cum.(ton)    Total(ton)",
        PLANT_PROFILE_HEADING => "Plant profile",
        PLANT_TAPHOLES => "Active/total tap-holes",
        PLANT_CASTS_PER_DAY => "Casts per day",
        PLANT_TAP_SPEED => "Tap speed (ton/min)",
        "guidance.bit_low" => "Low hold-up. Reduce to a 43mm bit to keep casting time.",
        "guidance.bit_medium" => "Moderate hold-up. Keep the 45mm bit.",
        "guidance.bit_high" => "High hold-up. Enlarge to a 48mm bit to raise tap speed.",
        "guidance.posture_low" => "Low operating score. Reduce the bit and extend the switch gap.",
        "guidance.posture_mid" => "Maintain current operating conditions.",
        "guidance.posture_high" => {
            "High-temperature regime. Shorten cast intervals and consider a larger bit."
        }
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("en-US"), Some("ko")), "en");
        assert_eq!(resolve_language(Some("auto"), Some("ko-KR")), "ko");
    }

    #[test]
    fn english_falls_back_to_korean_guidance() {
        let tr = Translator::new("en");
        assert_eq!(tr.t_or("guidance.unknown", "원문"), "원문");
        assert!(tr.t_or("guidance.bit_high", "원문").contains("48mm"));
        let ko = Translator::new("ko");
        assert_eq!(ko.t_or("guidance.bit_high", "원문"), "원문");
    }

    #[test]
    fn override_pack_replaces_builtin_strings() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("en.toml"),
            "[result]\nspeed = \"Cast rate:\"\n",
        )
        .expect("write");
        let tr = Translator::new_with_pack("en", dir.path());
        assert_eq!(tr.t(keys::RESULT_SPEED), "Cast rate:");
        assert_eq!(tr.t(keys::RESULT_DURATION), "Tap duration:");
        assert_eq!(tr.language(), Language::En);
    }

    #[test]
    fn plant_profile_labels_are_translated() {
        let plant_keys = [
            keys::PLANT_PROFILE_HEADING,
            keys::PLANT_TAPHOLES,
            keys::PLANT_CASTS_PER_DAY,
            keys::PLANT_TAP_SPEED,
        ];
        for key in plant_keys {
            assert_ne!(ko(key), "[missing translation]", "{key}");
            assert!(en(key).is_some(), "{key}");
        }
        assert_eq!(Translator::new("ko").t(keys::PLANT_CASTS_PER_DAY), "일일 출선 횟수");
        assert_eq!(Translator::new("en").t(keys::PLANT_CASTS_PER_DAY), "Casts per day");
    }
}
