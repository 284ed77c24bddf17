//! Per-locale label strings for every piece of text the pipeline emits
//! around the cards themselves. Formats use `{n}` / `{count}` / `{timeframe}`
//! placeholders filled by the caller via `str::replace`.

use super::Locale;

/// All user-visible labels for one locale.
#[derive(Debug)]
pub struct Labels {
    // Relative date labels
    pub today: &'static str,
    pub yesterday: &'static str,
    pub days_ago: &'static str,
    pub week_ago: &'static str,
    pub weeks_ago: &'static str,
    pub month_ago: &'static str,
    pub months_ago: &'static str,

    // History block labels
    pub history_header: &'static str,
    pub question: &'static str,
    pub cards: &'static str,
    pub interpretation: &'static str,
    pub insights: &'static str,
    pub reflection: &'static str,
    pub spread_reading: &'static str,
    pub daily_card: &'static str,

    // Salient pattern labels
    pub patterns_header: &'static str,
    pub recurring_cards: &'static str,
    pub breakthroughs: &'static str,
    pub question_evolution: &'static str,

    // Recurring-theme sentence and timeframes
    pub recurring_question: &'static str,
    pub timeframe_week: &'static str,
    pub timeframe_month: &'static str,
    pub timeframe_months: &'static str,
    pub timeframe_recent: &'static str,

    // Initial-prompt labels
    pub seeker_asks: &'static str,
    pub cards_header: &'static str,
    pub upright: &'static str,
    pub reversed: &'static str,
    pub keywords: &'static str,
    pub element_astrology: &'static str,
    pub birth_context: &'static str,
    pub sun_sign: &'static str,
    pub moon_sign: &'static str,
    pub rising_sign: &'static str,

    // Follow-up labels
    pub original_question: &'static str,
    pub new_question: &'static str,
    pub style_note: &'static str,
    pub shown_interpretation: &'static str,
    pub conversation_so_far: &'static str,
    pub formatting_instruction: &'static str,
}

static EN: Labels = Labels {
    today: "today",
    yesterday: "yesterday",
    days_ago: "{n} days ago",
    week_ago: "1 week ago",
    weeks_ago: "{n} weeks ago",
    month_ago: "1 month ago",
    months_ago: "{n} months ago",

    history_header: "Recent readings (most recent first):",
    question: "Question",
    cards: "Cards",
    interpretation: "Interpretation",
    insights: "Insights",
    reflection: "Reflection",
    spread_reading: "spread reading",
    daily_card: "daily card",

    patterns_header: "Salient patterns across these readings:",
    recurring_cards: "Recurring cards",
    breakthroughs: "{n} breakthrough moments (reflections or deep conversations)",
    question_evolution: "Questions show evolution patterns over time",

    recurring_question: "The seeker has asked about this {count} times in the {timeframe}.",
    timeframe_week: "past week",
    timeframe_month: "past month",
    timeframe_months: "past {n} months",
    timeframe_recent: "recent months",

    seeker_asks: "The seeker asks:",
    cards_header: "The cards drawn:",
    upright: "upright",
    reversed: "reversed",
    keywords: "Keywords",
    element_astrology: "Element/Astrology",
    birth_context: "Seeker's astrological context:",
    sun_sign: "Sun",
    moon_sign: "Moon",
    rising_sign: "Rising",

    original_question: "Original question",
    new_question: "The seeker now asks",
    style_note: "The reading was given in the {style} style.",
    shown_interpretation: "Interpretation currently shown to the seeker",
    conversation_so_far: "Conversation so far",
    formatting_instruction: "Answer in English. Use **bold** for key phrases and *italics* for \
        gentle emphasis. Do not bold or italicize card names.",
};

static ZH_TW: Labels = Labels {
    today: "今天",
    yesterday: "昨天",
    days_ago: "{n} 天前",
    week_ago: "1 週前",
    weeks_ago: "{n} 週前",
    month_ago: "1 個月前",
    months_ago: "{n} 個月前",

    history_header: "近期占卜紀錄（由新到舊）：",
    question: "問題",
    cards: "牌面",
    interpretation: "解讀",
    insights: "洞察",
    reflection: "反思",
    spread_reading: "牌陣占卜",
    daily_card: "每日一牌",

    patterns_header: "這些占卜中的顯著模式：",
    recurring_cards: "重複出現的牌",
    breakthroughs: "{n} 次突破時刻（反思或深入對話）",
    question_evolution: "問題隨時間呈現演變的軌跡",

    recurring_question: "求問者在{timeframe}已就此提問 {count} 次。",
    timeframe_week: "過去一週",
    timeframe_month: "過去一個月",
    timeframe_months: "過去 {n} 個月",
    timeframe_recent: "近幾個月",

    seeker_asks: "求問者的問題：",
    cards_header: "抽出的牌：",
    upright: "正位",
    reversed: "逆位",
    keywords: "關鍵字",
    element_astrology: "元素／占星",
    birth_context: "求問者的星盤背景：",
    sun_sign: "太陽",
    moon_sign: "月亮",
    rising_sign: "上升",

    original_question: "原始問題",
    new_question: "求問者現在問",
    style_note: "本次解讀採用{style}風格。",
    shown_interpretation: "目前顯示給求問者的解讀",
    conversation_so_far: "目前的對話",
    formatting_instruction: "請以繁體中文回答。重點語句使用**粗體**，溫和的強調使用*斜體*。\
        牌名不要加粗或斜體。",
};

static JA: Labels = Labels {
    today: "今日",
    yesterday: "昨日",
    days_ago: "{n}日前",
    week_ago: "1週間前",
    weeks_ago: "{n}週間前",
    month_ago: "1ヶ月前",
    months_ago: "{n}ヶ月前",

    history_header: "最近のリーディング（新しい順）：",
    question: "質問",
    cards: "カード",
    interpretation: "解釈",
    insights: "気づき",
    reflection: "振り返り",
    spread_reading: "スプレッド",
    daily_card: "今日の一枚",

    patterns_header: "これらのリーディングに見られる顕著なパターン：",
    recurring_cards: "繰り返し現れるカード",
    breakthroughs: "{n}回のブレイクスルー（振り返りや深い対話）",
    question_evolution: "質問が時間とともに変化する傾向が見られます",

    recurring_question: "相談者は{timeframe}にこのテーマについて{count}回尋ねています。",
    timeframe_week: "この1週間",
    timeframe_month: "この1ヶ月",
    timeframe_months: "この{n}ヶ月",
    timeframe_recent: "ここ数ヶ月",

    seeker_asks: "相談者の質問：",
    cards_header: "引かれたカード：",
    upright: "正位置",
    reversed: "逆位置",
    keywords: "キーワード",
    element_astrology: "エレメント／占星術",
    birth_context: "相談者の出生チャート：",
    sun_sign: "太陽",
    moon_sign: "月",
    rising_sign: "アセンダント",

    original_question: "最初の質問",
    new_question: "相談者は今こう尋ねています",
    style_note: "このリーディングは{style}スタイルで行われました。",
    shown_interpretation: "現在相談者に表示されている解釈",
    conversation_so_far: "これまでの対話",
    formatting_instruction: "日本語で答えてください。重要な語句は**太字**、やわらかな強調は\
        *斜体*を使ってください。カード名には装飾をつけないでください。",
};

static ES: Labels = Labels {
    today: "hoy",
    yesterday: "ayer",
    days_ago: "hace {n} días",
    week_ago: "hace 1 semana",
    weeks_ago: "hace {n} semanas",
    month_ago: "hace 1 mes",
    months_ago: "hace {n} meses",

    history_header: "Lecturas recientes (de la más nueva a la más antigua):",
    question: "Pregunta",
    cards: "Cartas",
    interpretation: "Interpretación",
    insights: "Revelaciones",
    reflection: "Reflexión",
    spread_reading: "tirada",
    daily_card: "carta del día",

    patterns_header: "Patrones destacados en estas lecturas:",
    recurring_cards: "Cartas recurrentes",
    breakthroughs: "{n} momentos reveladores (reflexiones o conversaciones profundas)",
    question_evolution: "Las preguntas muestran una evolución a lo largo del tiempo",

    recurring_question: "El consultante ha preguntado sobre esto {count} veces en {timeframe}.",
    timeframe_week: "la última semana",
    timeframe_month: "el último mes",
    timeframe_months: "los últimos {n} meses",
    timeframe_recent: "los últimos meses",

    seeker_asks: "El consultante pregunta:",
    cards_header: "Las cartas extraídas:",
    upright: "al derecho",
    reversed: "invertida",
    keywords: "Palabras clave",
    element_astrology: "Elemento/Astrología",
    birth_context: "Contexto astrológico del consultante:",
    sun_sign: "Sol",
    moon_sign: "Luna",
    rising_sign: "Ascendente",

    original_question: "Pregunta original",
    new_question: "El consultante ahora pregunta",
    style_note: "La lectura se dio en el estilo {style}.",
    shown_interpretation: "Interpretación que se muestra actualmente al consultante",
    conversation_so_far: "Conversación hasta ahora",
    formatting_instruction: "Responde en español. Usa **negrita** para frases clave y *cursiva* \
        para un énfasis suave. No apliques estilos a los nombres de las cartas.",
};

static RU: Labels = Labels {
    today: "сегодня",
    yesterday: "вчера",
    days_ago: "{n} дн. назад",
    week_ago: "неделю назад",
    weeks_ago: "{n} нед. назад",
    month_ago: "месяц назад",
    months_ago: "{n} мес. назад",

    history_header: "Недавние расклады (от новых к старым):",
    question: "Вопрос",
    cards: "Карты",
    interpretation: "Толкование",
    insights: "Озарения",
    reflection: "Размышление",
    spread_reading: "расклад",
    daily_card: "карта дня",

    patterns_header: "Заметные закономерности в этих раскладах:",
    recurring_cards: "Повторяющиеся карты",
    breakthroughs: "{n} моментов прорыва (размышления или глубокие беседы)",
    question_evolution: "Вопросы со временем заметно меняются",

    recurring_question: "Вопрошающий спрашивал об этом {count} раз за {timeframe}.",
    timeframe_week: "последнюю неделю",
    timeframe_month: "последний месяц",
    timeframe_months: "последние {n} месяцев",
    timeframe_recent: "последние месяцы",

    seeker_asks: "Вопрошающий спрашивает:",
    cards_header: "Выпавшие карты:",
    upright: "прямое положение",
    reversed: "перевёрнутая",
    keywords: "Ключевые слова",
    element_astrology: "Стихия/Астрология",
    birth_context: "Астрологический контекст вопрошающего:",
    sun_sign: "Солнце",
    moon_sign: "Луна",
    rising_sign: "Асцендент",

    original_question: "Исходный вопрос",
    new_question: "Теперь вопрошающий спрашивает",
    style_note: "Толкование выполнено в стиле «{style}».",
    shown_interpretation: "Толкование, которое сейчас видит вопрошающий",
    conversation_so_far: "Беседа до этого момента",
    formatting_instruction: "Отвечай по-русски. Используй **жирный шрифт** для ключевых фраз и \
        *курсив* для мягкого акцента. Названия карт не выделяй.",
};

static PT: Labels = Labels {
    today: "hoje",
    yesterday: "ontem",
    days_ago: "há {n} dias",
    week_ago: "há 1 semana",
    weeks_ago: "há {n} semanas",
    month_ago: "há 1 mês",
    months_ago: "há {n} meses",

    history_header: "Leituras recentes (da mais nova para a mais antiga):",
    question: "Pergunta",
    cards: "Cartas",
    interpretation: "Interpretação",
    insights: "Percepções",
    reflection: "Reflexão",
    spread_reading: "tiragem",
    daily_card: "carta do dia",

    patterns_header: "Padrões marcantes nestas leituras:",
    recurring_cards: "Cartas recorrentes",
    breakthroughs: "{n} momentos de virada (reflexões ou conversas profundas)",
    question_evolution: "As perguntas mostram uma evolução ao longo do tempo",

    recurring_question: "O consulente perguntou sobre isso {count} vezes em {timeframe}.",
    timeframe_week: "na última semana",
    timeframe_month: "no último mês",
    timeframe_months: "nos últimos {n} meses",
    timeframe_recent: "nos últimos meses",

    seeker_asks: "O consulente pergunta:",
    cards_header: "As cartas tiradas:",
    upright: "na posição normal",
    reversed: "invertida",
    keywords: "Palavras-chave",
    element_astrology: "Elemento/Astrologia",
    birth_context: "Contexto astrológico do consulente:",
    sun_sign: "Sol",
    moon_sign: "Lua",
    rising_sign: "Ascendente",

    original_question: "Pergunta original",
    new_question: "O consulente agora pergunta",
    style_note: "A leitura foi feita no estilo {style}.",
    shown_interpretation: "Interpretação atualmente exibida ao consulente",
    conversation_so_far: "Conversa até agora",
    formatting_instruction: "Responda em português. Use **negrito** para frases-chave e *itálico* \
        para ênfase suave. Não estilize os nomes das cartas.",
};

/// Returns the label set for a locale.
pub fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &EN,
        Locale::ZhTw => &ZH_TW,
        Locale::Ja => &JA,
        Locale::Es => &ES,
        Locale::Ru => &RU,
        Locale::Pt => &PT,
    }
}
