//! User-facing text. The room is presented in Arabic.

pub const LOADING: &str = "جاري التحميل...";

pub const WELCOME_TITLE: &str = "مرحباً بك في عالمنا";
pub const CLICK_TO_ENTER: &str = "اضغط في أي مكان للدخول";
pub const CONTROLS_HEADING: &str = "التحكم:";
pub const CONTROLS_MOVE: &str = "W A S D أو ص ش س ي أو الأسهم";
pub const CONTROLS_LOOK: &str = "الماوس للنظر حولك";
pub const CONTROLS_LAYOUTS: &str = "يعمل مع الكيبورد العربي والإنجليزي";
pub const EXPLORE_HINT: &str = "استكشف الغرفة واستمتع بالهدايا والذكريات 💝";

pub const HOVER_BOUQUET: &str = "🌹 اضغط على الماوس لحمل الباقة";
pub const HOVER_FRAME: &str = "🖼️ اضغط على الماوس لحمل البرواز";
pub const HOLDING_BOUQUET: &str = "اضغط G لرمي الباقة";
pub const HOLDING_FRAME: &str = "اضغط G لرمي البرواز";

pub const WISH_PROMPT: &str = "🎂 تمنى أمنية ✨";
pub const WISH_PROMPT_KEY: &str = "اضغط X للفتح";
pub const WISH_TITLE: &str = "تمنى أمنية";
pub const WISH_SUBTITLE: &str = "اكتب أمنيتك وانفخ الشموع ✨";
pub const WISH_PLACEHOLDER: &str = "أتمنى أن...";
pub const WISH_SUBMIT: &str = "انفخ الشموع";
pub const WISH_SUBMITTING: &str = "جاري النفخ...";
pub const WISH_CANCEL: &str = "إلغاء";

pub const MUTE_ON: &str = "🔇";
pub const MUTE_OFF: &str = "🔊";
